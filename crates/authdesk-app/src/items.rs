// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

/// Ordered list of strings; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemList(Vec<String>);

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Appends and returns the new item's index.
    pub fn push(&mut self, item: impl Into<String>) -> usize {
        self.0.push(item.into());
        self.0.len() - 1
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, item: impl Into<String>) -> usize {
        let index = index.min(self.0.len());
        self.0.insert(index, item.into());
        index
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn set(&mut self, index: usize, item: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = item.into();
                true
            }
            None => false,
        }
    }

    /// Swaps the item with its predecessor; returns the item's new index.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.0.len() {
            return None;
        }
        self.0.swap(index - 1, index);
        Some(index - 1)
    }

    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index + 1 >= self.0.len() {
            return None;
        }
        self.0.swap(index, index + 1);
        Some(index + 1)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for ItemList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A modal editor over an item list. It edits the list it is handed in
/// place and returns when the user closes it.
pub trait CollectionDialog {
    fn show_modal(&mut self, title: &str, items: &mut ItemList) -> Result<()>;
}

/// Owner of an editable string list with a modal editing surface.
///
/// The dialog mutates the backing store directly, so there is no cancel:
/// whatever the list looks like when the dialog closes is what `items()`
/// returns afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemListEditor {
    title: String,
    items: ItemList,
}

impl ItemListEditor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: ItemList::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn items(&self) -> Vec<String> {
        self.items.as_slice().to_vec()
    }

    pub fn item_list(&self) -> &ItemList {
        &self.items
    }

    /// Replaces the whole list; existing items are cleared first.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.clear();
        for item in items {
            self.items.push(item);
        }
    }

    pub fn open(&mut self, dialog: &mut dyn CollectionDialog) -> Result<()> {
        dialog.show_modal(&self.title, &mut self.items)
    }
}
