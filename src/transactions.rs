use std::{fs, marker::PhantomData, path::PathBuf};

/// Undo step for an entry created during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOperation {
    RemoveFile(PathBuf),
    /// Removes the directory and everything below it. Only recorded for the
    /// topmost directory a run created, so nothing pre-existing is inside.
    RemoveDir(PathBuf),
}
/// Active Transaction
pub struct Active;
/// Committed Transaction
pub struct Committed;
/// Canceled Transaction
pub struct Canceled;
/// A trait that tells us if rollback should occur when dropped.
pub trait TransactionState {
    const SHOULD_ROLLBACK: bool;
}
impl TransactionState for Active {
    const SHOULD_ROLLBACK: bool = true;
}
impl TransactionState for Committed {
    const SHOULD_ROLLBACK: bool = false;
}
impl TransactionState for Canceled {
    const SHOULD_ROLLBACK: bool = true;
}
/// Journal of the directories and files a materialization run created.
///
/// The state parameter decides what happens on drop: a [`Committed`]
/// transaction keeps everything, while an [`Active`] or [`Canceled`] one
/// undoes the recorded operations in reverse order. Entries that existed
/// before the run are never recorded, so rollback only removes what the run
/// itself added.
///
/// # Example
///
/// ```rust
/// use mkstruct::transactions::{Active, RollbackOperation, Transaction};
///
/// let mut trx = Transaction::<Active>::new();
/// trx.add_operation(RollbackOperation::RemoveFile("some/path".into()));
/// trx.commit(); // No rollback will happen
/// ```
pub struct Transaction<State: TransactionState> {
    rollback_operations: Vec<RollbackOperation>,
    state: PhantomData<State>,
}
impl Transaction<Active> {
    pub fn new() -> Self {
        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }
    /// Registers the undo step for something the run just created.
    pub fn add_operation(&mut self, operation: RollbackOperation) {
        self.rollback_operations.push(operation);
    }

    pub fn len(&self) -> usize {
        self.rollback_operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rollback_operations.is_empty()
    }
    /// Keeps everything the run created.
    pub fn commit(mut self) -> Transaction<Committed> {
        self.rollback_operations.clear();

        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }
    /// Hands the recorded operations to a [`Transaction<Canceled>`], which
    /// undoes them when dropped.
    pub fn cancel(mut self) -> Transaction<Canceled> {
        let rollback_operations = std::mem::take(&mut self.rollback_operations);

        Transaction {
            rollback_operations,
            state: PhantomData,
        }
    }
}
impl Default for Transaction<Active> {
    fn default() -> Self {
        Self::new()
    }
}
impl<S: TransactionState> Drop for Transaction<S> {
    fn drop(&mut self) {
        if S::SHOULD_ROLLBACK && !self.rollback_operations.is_empty() {
            log::warn!(
                "rolling back {} created entries",
                self.rollback_operations.len()
            );
            while let Some(operation) = self.rollback_operations.pop() {
                match operation {
                    RollbackOperation::RemoveDir(path) => {
                        log::debug!("removing dir: {}", path.display());
                        let _ = fs::remove_dir_all(&path);
                    }
                    RollbackOperation::RemoveFile(path) => {
                        log::debug!("removing file: {}", path.display());
                        let _ = fs::remove_file(&path);
                    }
                }
            }
        } else if !S::SHOULD_ROLLBACK {
            log::debug!("committing transaction");
        }
    }
}
