//! Owned singly linked list used as the per-bucket chain by
//! `ChainingHashMap`.
//!
//! Each chain owns its head node and each node exclusively owns its
//! successor, so traversal is head-to-tail with no shared references.
//! New entries go in at the head; the map layer is responsible for
//! checking for an existing key before pushing.

use std::borrow::Borrow;

struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

pub(crate) struct Chain<K, V> {
    head: Option<Box<Node<K, V>>>,
}

impl<K, V> Chain<K, V> {
    pub(crate) const fn new() -> Self {
        Chain { head: None }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepends a node. Does not look for an existing key.
    pub(crate) fn push_front(&mut self, key: K, value: V) {
        let node = Box::new(Node {
            key,
            value,
            next: self.head.take(),
        });
        self.head = Some(node);
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if node.key.borrow() == key {
                return Some(&node.value);
            }
            cur = node.next.as_deref();
        }
        None
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if node.key.borrow() == key {
                return Some(&mut node.value);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the first node whose key matches and returns its value.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = &mut self.head;
        loop {
            match cur {
                None => return None,
                Some(node) if node.key.borrow() == key => {
                    let node = cur.take()?;
                    let node = *node;
                    *cur = node.next;
                    return Some(node.value);
                }
                Some(node) => cur = &mut node.next,
            }
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

// Default drop would recurse once per node; walk the links instead so
// a pathological chain cannot overflow the stack.
impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (&node.key, &node.value)
        })
    }
}

/// By-value drain in head-to-tail order; used when a table rebuilds
/// itself during a resize.
pub(crate) struct IntoIter<K, V> {
    next: Option<Box<Node<K, V>>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            let node = *node;
            self.next = node.next;
            (node.key, node.value)
        })
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            next: self.head.take(),
        }
    }
}
