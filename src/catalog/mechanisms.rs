use crate::mechanism::Mechanism;
use crate::oid::Oid;
use crate::registry::ExtensionRegistry;
use std::iter::FusedIterator;
use std::sync::Arc;
use std::vec;

/// One provider answer, wrapped into mechanisms as it is consumed.
pub struct Mechanisms {
    oids: vec::IntoIter<Oid>,
    registry: Arc<ExtensionRegistry>,
}

impl Mechanisms {
    pub(super) fn new(oids: Vec<Oid>, registry: Arc<ExtensionRegistry>) -> Self {
        Self {
            oids: oids.into_iter(),
            registry,
        }
    }
}

impl Iterator for Mechanisms {
    type Item = Mechanism;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.oids.next()?;
        Some(Mechanism::from_oid(oid, &self.registry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.oids.size_hint()
    }
}

impl ExactSizeIterator for Mechanisms {}

impl FusedIterator for Mechanisms {}
