use std::ops::{Deref, DerefMut};

use log::warn;

use crate::classify::Classifier;
use crate::error::Result;

/// Owns an initialized classifier and deinitializes it exactly once.
///
/// Dropping the guard releases the classifier and only logs a failed
/// deinit; [`ClassifierGuard::release`] does the same but hands the error
/// back to the caller.
pub struct ClassifierGuard<'a, C: Classifier> {
    classifier: &'a mut C,
    released: bool,
}

impl<'a, C: Classifier> ClassifierGuard<'a, C> {
    /// Wrap a classifier whose `init` already succeeded
    pub fn new(classifier: &'a mut C) -> Self {
        Self { classifier, released: false }
    }

    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.classifier.deinit()
    }
}

impl<C: Classifier> Deref for ClassifierGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.classifier
    }
}

impl<C: Classifier> DerefMut for ClassifierGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.classifier
    }
}

impl<C: Classifier> Drop for ClassifierGuard<'_, C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.classifier.deinit() {
            warn!("Classifier deinit failed, ret={}: {}", e.code(), e);
        }
    }
}
