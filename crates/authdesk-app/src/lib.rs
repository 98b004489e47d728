// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dashboard;
pub mod detail;
pub mod error;
pub mod ids;
pub mod items;
pub mod model;
pub mod notify;
pub mod rows;
pub mod source;
pub mod state;
pub mod sync;
pub mod table;

pub use dashboard::*;
pub use detail::*;
pub use error::*;
pub use ids::*;
pub use items::*;
pub use model::*;
pub use notify::*;
pub use rows::*;
pub use source::*;
pub use state::*;
pub use sync::*;
pub use table::*;
