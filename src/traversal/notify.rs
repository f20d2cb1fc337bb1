//! Match notifications.
//!
//! Commands react to matches through [`FoundHooks`]. The traversal reconstructs
//! the matched node's ancestor path and hands the names, plus a handle on the
//! table, to the hook for the node's level.

use super::filter::Level;
use crate::commands::output::OutputLog;
use crate::error::Result;
use crate::store::{StoreClient, TableHandle};
use tracing::trace;

/// Per-level callbacks invoked on matches. Every hook defaults to a no-op.
#[allow(unused_variables)]
pub trait FoundHooks {
    fn found_table(&mut self, table: &dyn TableHandle, out: &mut OutputLog) -> Result<()> {
        Ok(())
    }

    fn found_row(&mut self, table: &dyn TableHandle, row: &str, out: &mut OutputLog) -> Result<()> {
        Ok(())
    }

    fn found_family(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        Ok(())
    }

    fn found_qualifier(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        Ok(())
    }

    fn found_value(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        value: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        Ok(())
    }
}

/// Names from the table down to the matched node, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPath {
    pub level: Level,
    pub names: Vec<String>,
}

impl FoundPath {
    fn name(&self, level: Level) -> &str {
        self.names.get(level.depth()).map(String::as_str).unwrap_or("")
    }
}

/// Invokes the hook matching `path.level`.
///
/// Table-level matches have no handle open yet: one is opened for the hook and
/// released as soon as it returns, whatever the outcome. Deeper levels reuse the
/// handle the traversal already holds.
pub fn dispatch<H>(
    hooks: &mut H,
    store: &dyn StoreClient,
    table: Option<&dyn TableHandle>,
    path: &FoundPath,
    out: &mut OutputLog,
) -> Result<()>
where
    H: FoundHooks + ?Sized,
{
    trace!(level = %path.level, path = ?path.names, "Notifying match");

    let row = path.name(Level::Row);
    let family = path.name(Level::Family);
    let qualifier = path.name(Level::Qualifier);

    match (path.level, table) {
        (Level::Table, _) => {
            let handle = store.open_table(path.name(Level::Table))?;
            let result = hooks.found_table(handle.as_ref(), out);
            drop(handle);
            result
        }
        (Level::Row, Some(t)) => hooks.found_row(t, row, out),
        (Level::Family, Some(t)) => hooks.found_family(t, row, family, out),
        (Level::Qualifier, Some(t)) => hooks.found_qualifier(t, row, family, qualifier, out),
        (Level::Value, Some(t)) => {
            hooks.found_value(t, row, family, qualifier, path.name(Level::Value), out)
        }
        _ => Ok(()),
    }
}
