//! Scripted in-memory `CategoryApi` for screen and handler tests.
//!
//! Responses are queued up front; every call is recorded so tests can assert
//! which round-trips a screen issued (or that it issued none).

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::CategoryApi;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CreateCategoryInput, UpdateCategoryInput};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Tree,
    Get(i64),
    Create(CreateCategoryInput),
    Update(i64, UpdateCategoryInput),
    Delete(i64),
}

#[derive(Default)]
pub struct FakeCategoryApi {
    /// Successive tree responses; the last one repeats once the queue drains
    trees: Mutex<VecDeque<Result<Vec<Category>>>>,
    categories: Mutex<HashMap<i64, Category>>,
    write_error: Mutex<Option<AppError>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCategoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(self, forest: Vec<Category>) -> Self {
        self.trees.lock().unwrap().push_back(Ok(forest));
        self
    }

    pub fn with_tree_error(self, err: AppError) -> Self {
        self.trees.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_category(self, category: Category) -> Self {
        self.categories
            .lock()
            .unwrap()
            .insert(category.id, category);
        self
    }

    pub fn failing_writes(self, err: AppError) -> Self {
        *self.write_error.lock().unwrap() = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<()> {
        match self.write_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CategoryApi for FakeCategoryApi {
    async fn get_category_tree(&self) -> Result<Vec<Category>> {
        self.record(Call::Tree);
        let mut trees = self.trees.lock().unwrap();
        if trees.len() > 1 {
            return trees.pop_front().unwrap_or(Ok(Vec::new()));
        }
        trees.front().cloned().unwrap_or(Ok(Vec::new()))
    }

    async fn get_category(&self, id: i64) -> Result<Category> {
        self.record(Call::Get(id));
        self.categories
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    async fn create_category(&self, input: &CreateCategoryInput) -> Result<Category> {
        self.record(Call::Create(input.clone()));
        self.write_result()?;
        Ok(Category {
            id: 100,
            name: input.name.clone(),
            parent_id: input.parent_id,
            depth: if input.parent_id.is_some() { 2 } else { 1 },
            sort_order: input.sort_order.unwrap_or(0),
            children: Vec::new(),
        })
    }

    async fn update_category(&self, id: i64, input: &UpdateCategoryInput) -> Result<Category> {
        self.record(Call::Update(id, input.clone()));
        self.write_result()?;
        let mut current = self
            .categories
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
        if let Some(name) = &input.name {
            current.name = name.clone();
        }
        if let Some(parent_id) = input.parent_id {
            current.parent_id = parent_id;
        }
        if let Some(sort_order) = input.sort_order {
            current.sort_order = sort_order;
        }
        Ok(current)
    }

    async fn delete_category(&self, id: i64) -> Result<i64> {
        self.record(Call::Delete(id));
        self.write_result()?;
        Ok(id)
    }
}

/// Shorthand for building tree fixtures
pub fn node(id: i64, name: &str, parent_id: Option<i64>, depth: u32, children: Vec<Category>) -> Category {
    Category {
        id,
        name: name.to_string(),
        parent_id,
        depth,
        sort_order: 0,
        children,
    }
}
