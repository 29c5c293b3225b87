//! Shared containers: arrays and associative arrays
//!
//! Both are reference types. Cloning a container value clones the handle,
//! so every alias observes mutations made through any other.

use super::{Number, Value};
use crate::error::RuntimeError;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Hashable form of a value used as an associative-array key.
///
/// Decimal and hexadecimal keys share the integer space; string keys are
/// case-sensitive. Containers and functions are not valid keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Float(OrderedFloat<f64>),
    String(Rc<String>),
    Bool(bool),
}

impl HashKey {
    pub fn from_value(value: &Value) -> Result<Self, RuntimeError> {
        match value {
            Value::Number(Number::Float(f)) => Ok(HashKey::Float(OrderedFloat(*f))),
            Value::Number(Number::Decimal(n) | Number::Hexadecimal(n)) => {
                Ok(HashKey::Integer(*n))
            }
            Value::String(s) => Ok(HashKey::String(Rc::clone(s))),
            Value::Boolean(b) => Ok(HashKey::Bool(*b)),
            other => Err(RuntimeError::InvalidKey {
                found: other.type_name(),
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            HashKey::Integer(n) => Value::Number(Number::Decimal(*n)),
            HashKey::Float(f) => Value::Number(Number::Float(f.0)),
            HashKey::String(s) => Value::String(Rc::clone(s)),
            HashKey::Bool(b) => Value::Boolean(*b),
        }
    }
}

impl From<&str> for HashKey {
    fn from(s: &str) -> Self {
        HashKey::String(Rc::new(s.to_string()))
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(n) => write!(f, "{}", n),
            HashKey::Float(x) => write!(f, "{:?}", x.0),
            HashKey::String(s) => f.write_str(s),
            HashKey::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Ordered, 1-based array handle
#[derive(Debug, Clone, Default)]
pub struct ValueArray(Rc<RefCell<Vec<Value>>>);

impl ValueArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        ValueArray(Rc::new(RefCell::new(values)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Read access to the elements
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Element at a 1-based index
    pub fn get(&self, key: &Value) -> Result<Value, RuntimeError> {
        let slot = self.slot(key)?;
        Ok(self.0.borrow()[slot].clone())
    }

    /// Replace the element at a 1-based index
    pub fn set(&self, key: &Value, value: Value) -> Result<(), RuntimeError> {
        let slot = self.slot(key)?;
        self.0.borrow_mut()[slot] = value;
        Ok(())
    }

    /// Convert a 1-based index value into a vector slot
    fn slot(&self, key: &Value) -> Result<usize, RuntimeError> {
        let index = match key {
            Value::Number(n) => n.as_index().ok_or(RuntimeError::InvalidIndex)?,
            _ => return Err(RuntimeError::InvalidIndex),
        };
        let len = self.len();
        usize::try_from(index)
            .ok()
            .filter(|i| (1..=len).contains(i))
            .map(|i| i - 1)
            .ok_or(RuntimeError::IndexOutOfRange)
    }

    pub fn ptr_eq(&self, other: &ValueArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(super) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

/// Insertion-ordered associative array handle
#[derive(Debug, Clone, Default)]
pub struct ValueMap(Rc<RefCell<IndexMap<HashKey, Value>>>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn borrow(&self) -> Ref<'_, IndexMap<HashKey, Value>> {
        self.0.borrow()
    }

    pub fn get(&self, key: &Value) -> Result<Value, RuntimeError> {
        let hash_key = HashKey::from_value(key)?;
        self.0
            .borrow()
            .get(&hash_key)
            .cloned()
            .ok_or_else(|| RuntimeError::KeyNotFound {
                key: hash_key.to_string(),
            })
    }

    /// Insert or replace; a replaced key keeps its original position
    pub fn insert(&self, key: &Value, value: Value) -> Result<(), RuntimeError> {
        let hash_key = HashKey::from_value(key)?;
        self.0.borrow_mut().insert(hash_key, value);
        Ok(())
    }

    pub fn ptr_eq(&self, other: &ValueMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(super) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: i64) -> Value {
        Value::Number(Number::Decimal(n))
    }

    #[test]
    fn test_array_is_one_based() {
        let arr = ValueArray::from_vec(vec![num(10), num(20), num(30)]);
        assert_eq!(arr.get(&num(1)).unwrap(), num(10));
        assert_eq!(arr.get(&num(3)).unwrap(), num(30));
        assert_eq!(arr.get(&num(0)), Err(RuntimeError::IndexOutOfRange));
        assert_eq!(arr.get(&num(4)), Err(RuntimeError::IndexOutOfRange));
        assert_eq!(arr.get(&num(-1)), Err(RuntimeError::IndexOutOfRange));
    }

    #[test]
    fn test_array_rejects_non_integer_index() {
        let arr = ValueArray::from_vec(vec![num(1)]);
        assert_eq!(
            arr.get(&Value::Number(Number::Float(1.5))),
            Err(RuntimeError::InvalidIndex)
        );
        assert_eq!(arr.get(&Value::string("1")), Err(RuntimeError::InvalidIndex));
    }

    #[test]
    fn test_array_accepts_whole_float_index() {
        let arr = ValueArray::from_vec(vec![num(10), num(20)]);
        assert_eq!(arr.get(&Value::Number(Number::Float(2.0))).unwrap(), num(20));
        arr.set(&Value::Number(Number::Float(1.0)), num(5)).unwrap();
        assert_eq!(arr.get(&num(1)).unwrap(), num(5));
        assert_eq!(
            arr.get(&Value::Number(Number::Float(3.0))),
            Err(RuntimeError::IndexOutOfRange)
        );
        assert_eq!(
            arr.get(&Value::Number(Number::Float(f64::NAN))),
            Err(RuntimeError::InvalidIndex)
        );
    }

    #[test]
    fn test_array_set_is_visible_through_aliases() {
        let arr = ValueArray::from_vec(vec![num(1), num(2)]);
        let alias = arr.clone();
        alias.set(&num(2), num(99)).unwrap();
        assert_eq!(arr.get(&num(2)).unwrap(), num(99));
        assert!(arr.ptr_eq(&alias));
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let map = ValueMap::new();
        map.insert(&Value::string("b"), num(1)).unwrap();
        map.insert(&Value::string("a"), num(2)).unwrap();
        map.insert(&Value::string("b"), num(3)).unwrap();
        let keys: Vec<String> = map.borrow().keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(map.get(&Value::string("b")).unwrap(), num(3));
    }

    #[test]
    fn test_map_keys_are_case_sensitive() {
        let map = ValueMap::new();
        map.insert(&Value::string("Key"), num(1)).unwrap();
        assert_eq!(
            map.get(&Value::string("key")),
            Err(RuntimeError::KeyNotFound { key: "key".into() })
        );
    }

    #[test]
    fn test_decimal_and_hex_keys_collide() {
        let map = ValueMap::new();
        map.insert(&num(16), Value::string("x")).unwrap();
        let hex = Value::Number(Number::Hexadecimal(16));
        assert_eq!(map.get(&hex).unwrap(), Value::string("x"));
    }

    #[test]
    fn test_containers_are_not_keys() {
        let map = ValueMap::new();
        let key = Value::Array(ValueArray::new());
        assert_eq!(
            map.insert(&key, num(1)),
            Err(RuntimeError::InvalidKey { found: "array" })
        );
    }
}
