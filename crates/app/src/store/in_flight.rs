//! Duplicate submission guard.

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashSet;

use crate::store::StoreError;

/// An operation and the record it targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OperationKey {
    pub(crate) operation: &'static str,
    pub(crate) target: Option<String>,
}

impl OperationKey {
    pub(crate) fn new(operation: &'static str) -> Self {
        Self {
            operation,
            target: None,
        }
    }

    pub(crate) fn on(operation: &'static str, target: impl ToString) -> Self {
        Self {
            operation,
            target: Some(target.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct InFlight {
    keys: Mutex<FxHashSet<OperationKey>>,
}

impl InFlight {
    /// Mark `key` as running until the returned guard is dropped.
    pub(crate) fn begin(&self, key: OperationKey) -> Result<InFlightGuard<'_>, StoreError> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);

        if !keys.insert(key.clone()) {
            return Err(StoreError::AlreadyInFlight {
                operation: key.operation,
            });
        }

        Ok(InFlightGuard { owner: self, key })
    }
}

#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: OperationKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn second_begin_is_rejected_until_guard_drops() -> TestResult {
        let in_flight = InFlight::default();

        let guard = in_flight.begin(OperationKey::on("delete_product", 7))?;

        assert!(matches!(
            in_flight.begin(OperationKey::on("delete_product", 7)),
            Err(StoreError::AlreadyInFlight {
                operation: "delete_product"
            })
        ));

        drop(guard);

        assert!(in_flight.begin(OperationKey::on("delete_product", 7)).is_ok());

        Ok(())
    }

    #[test]
    fn different_targets_run_concurrently() -> TestResult {
        let in_flight = InFlight::default();

        let _first = in_flight.begin(OperationKey::on("toggle_product", 1))?;
        let _second = in_flight.begin(OperationKey::on("toggle_product", 2))?;
        let _other = in_flight.begin(OperationKey::new("create_order"))?;

        Ok(())
    }
}
