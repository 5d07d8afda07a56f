use remindme_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for the inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn all<T: Clone>(collection: &Mutex<Vec<T>>) -> Vec<T> {
    collection.lock().unwrap().clone()
}

pub fn delete<T: Clone + Entity>(val_id: ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}
