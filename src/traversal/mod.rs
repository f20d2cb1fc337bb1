//! Filtered depth-first traversal of the table → row → family → qualifier →
//! value hierarchy.
//!
//! Nodes are materialized lazily while descending and kept in an arena that
//! doubles as the ancestor stack: a node refers to its parent by index, and a
//! subtree's entries are truncated away once it has been visited. The database
//! root is implicit in [`Traversal::run`].
//!
//! A node that matches its level's filter and sits at the traversal depth is a
//! *hit*. A hit prints the headers of ancestors that have not printed yet, then
//! itself, and notifies the node at the command's level once.

mod chunks;
mod filter;
mod limit;
mod notify;

pub use chunks::ChunkLocator;
pub use filter::{Level, PatternFilterSet};
pub use limit::{Flow, RowLimitGuard};
pub use notify::{dispatch, FoundHooks, FoundPath};

use crate::commands::output::OutputLog;
use crate::config::ChunkConfig;
use crate::error::Result;
use crate::store::{chunk_qualifier, ScanFilter, StoreClient, TableHandle};
use tracing::debug;

/// What a traversal visits, prints and notifies. Fixed once arguments are parsed.
#[derive(Debug, Clone, Default)]
pub struct TraversalPlan {
    pub filters: PatternFilterSet,
    /// Level the command reports at; `None` reports at the traversal depth.
    pub level: Option<Level>,
    pub to_output: bool,
    pub notify: bool,
    /// Row key looked up directly instead of scanning all rows.
    pub exact_row: Option<String>,
}

impl TraversalPlan {
    /// Deepest level visited: the command's level or the deepest filtered level.
    pub fn depth(&self) -> Level {
        let level = self.level.unwrap_or(Level::Value);
        self.filters.deepest().map_or(level, |deepest| deepest.max(level))
    }
}

type NodeId = usize;

#[derive(Debug)]
struct Node {
    level: Level,
    name: String,
    parent: Option<NodeId>,
    outputted: bool,
    notified: bool,
}

/// One traversal run. Consumed by [`run`](Self::run).
pub struct Traversal<'t, H: ?Sized> {
    store: &'t dyn StoreClient,
    out: &'t mut OutputLog,
    rows: &'t mut RowLimitGuard,
    hooks: &'t mut H,
    plan: &'t TraversalPlan,
    chunks: &'t ChunkConfig,
    depth: Level,
    arena: Vec<Node>,
}

impl<'t, H> Traversal<'t, H>
where
    H: FoundHooks + ?Sized,
{
    pub fn new(
        store: &'t dyn StoreClient,
        out: &'t mut OutputLog,
        rows: &'t mut RowLimitGuard,
        hooks: &'t mut H,
        plan: &'t TraversalPlan,
        chunks: &'t ChunkConfig,
    ) -> Self {
        Self {
            store,
            out,
            rows,
            hooks,
            plan,
            chunks,
            depth: plan.depth(),
            arena: Vec::with_capacity(8),
        }
    }

    /// Walks every matching table. Store failures abort the walk.
    pub fn run(mut self) -> Result<Flow> {
        debug!(depth = %self.depth, "Starting traversal");
        let store = self.store;

        for table in store.list_tables()? {
            if !self.plan.filters.matches(Level::Table, &table) {
                continue;
            }
            let flow = self.child(Level::Table, table, None, None, |t, id| t.visit_table(id))?;
            if flow.is_stop() {
                return Ok(flow);
            }
        }
        Ok(Flow::Continue)
    }

    fn visit_table(&mut self, id: NodeId) -> Result<Flow> {
        let store = self.store;
        let table = store.open_table(&self.arena[id].name)?;
        self.travel_rows(id, table.as_ref())
    }

    fn travel_rows(&mut self, table_id: NodeId, table: &dyn TableHandle) -> Result<Flow> {
        let rows = match &self.plan.exact_row {
            Some(key) if table.row_exists(key)? => vec![key.clone()],
            Some(_) => Vec::new(),
            None => table.list_rows()?,
        };

        for row in rows {
            if !self.plan.filters.matches(Level::Row, &row) {
                continue;
            }
            if self.rows.increment().is_stop() {
                return Ok(Flow::StopAtLimit);
            }
            let flow = self.child(Level::Row, row, Some(table_id), Some(table), |t, id| {
                t.travel_families(id, table)
            })?;
            if flow.is_stop() {
                return Ok(flow);
            }
        }
        Ok(Flow::Continue)
    }

    fn travel_families(&mut self, row_id: NodeId, table: &dyn TableHandle) -> Result<Flow> {
        let families = table.list_families(&self.arena[row_id].name)?;

        for family in families {
            if !self.plan.filters.matches(Level::Family, &family) {
                continue;
            }
            let flow = self.child(Level::Family, family, Some(row_id), Some(table), |t, id| {
                t.travel_cells(id, table)
            })?;
            if flow.is_stop() {
                return Ok(flow);
            }
        }
        Ok(Flow::Continue)
    }

    fn travel_cells(&mut self, family_id: NodeId, table: &dyn TableHandle) -> Result<Flow> {
        let chunks = self.chunks;
        let filters = &self.plan.filters;
        let (row, family) = self.row_and_family(family_id);
        let chunked = chunks.families.contains(&family);

        let filter = ScanFilter {
            qualifier: filters.get(Level::Qualifier),
            value: filters.get(Level::Value),
            skip_chunks: chunked.then_some(chunks.prefix.as_str()),
        };
        for (qualifier, value) in table.scan(&row, &family, &filter)? {
            if self.visit_cell(family_id, table, qualifier, value)?.is_stop() {
                return Ok(Flow::StopAtLimit);
            }
        }

        if chunked {
            return self.travel_chunks(family_id, table, &row, &family);
        }
        Ok(Flow::Continue)
    }

    /// Visits a chunk series without reading every chunk.
    ///
    /// Unfiltered, only the first and last chunks are read and the chunks in
    /// between are reported as omitted. With a qualifier, value or other filter
    /// every chunk whose qualifier matches is read and filtered.
    fn travel_chunks(
        &mut self,
        family_id: NodeId,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
    ) -> Result<Flow> {
        let chunks = self.chunks;
        let prefix = chunks.prefix.as_str();

        let Some((first, first_value)) = table.first_chunk(row, family, prefix)? else {
            return Ok(Flow::Continue);
        };
        let last = ChunkLocator::new(chunks.ceiling).find_last_index(first, |index| {
            table.exists(row, family, &chunk_qualifier(prefix, index))
        })?;
        debug!(row, family, first, last, "Located chunk series");

        let filtered = self
            .plan
            .filters
            .has_any(&[Level::Qualifier, Level::Value, Level::Other]);

        if !filtered {
            let first_qualifier = chunk_qualifier(prefix, first);
            if self
                .visit_cell(family_id, table, first_qualifier, first_value)?
                .is_stop()
            {
                return Ok(Flow::StopAtLimit);
            }
            if last > first {
                if last > first + 1 {
                    self.omitted(family_id, last - first - 1);
                }
                let last_qualifier = chunk_qualifier(prefix, last);
                if let Some(value) = table.get(row, family, &last_qualifier)? {
                    return self.visit_cell(family_id, table, last_qualifier, value);
                }
            }
            return Ok(Flow::Continue);
        }

        for index in first..=last {
            let qualifier = chunk_qualifier(prefix, index);
            if !self.plan.filters.matches(Level::Qualifier, &qualifier) {
                continue;
            }
            if let Some(value) = table.get(row, family, &qualifier)? {
                if self.visit_cell(family_id, table, qualifier, value)?.is_stop() {
                    return Ok(Flow::StopAtLimit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn visit_cell(
        &mut self,
        family_id: NodeId,
        table: &dyn TableHandle,
        qualifier: String,
        value: String,
    ) -> Result<Flow> {
        if !self.plan.filters.matches(Level::Qualifier, &qualifier) {
            return Ok(Flow::Continue);
        }
        self.child(
            Level::Qualifier,
            qualifier,
            Some(family_id),
            Some(table),
            move |t, id| {
                if !t.plan.filters.matches(Level::Value, &value) {
                    return Ok(Flow::Continue);
                }
                t.child(Level::Value, value, Some(id), Some(table), |_, _| {
                    Ok(Flow::Continue)
                })
            },
        )
    }

    /// Pushes a node, visits it, and pops it (and its subtree) again.
    ///
    /// A node at the traversal depth is a hit; otherwise `visit` descends.
    fn child<F>(
        &mut self,
        level: Level,
        name: String,
        parent: Option<NodeId>,
        table: Option<&dyn TableHandle>,
        visit: F,
    ) -> Result<Flow>
    where
        F: FnOnce(&mut Self, NodeId) -> Result<Flow>,
    {
        let id = self.arena.len();
        self.arena.push(Node {
            level,
            name,
            parent,
            outputted: false,
            notified: false,
        });

        let flow = if level >= self.depth {
            self.hit(id, table).map(|()| Flow::Continue)
        } else {
            visit(self, id)
        };

        self.arena.truncate(id);
        flow
    }

    fn hit(&mut self, id: NodeId, table: Option<&dyn TableHandle>) -> Result<()> {
        if self.plan.to_output {
            self.print_path(id);
        }
        if !self.plan.notify {
            return Ok(());
        }

        let target = self.plan.level.unwrap_or(self.arena[id].level);
        let Some(node) = self.ancestors(id).find(|n| self.arena[*n].level == target) else {
            return Ok(());
        };
        if self.arena[node].notified {
            return Ok(());
        }
        self.arena[node].notified = true;

        let path = self.path_of(node);
        dispatch(&mut *self.hooks, self.store, table, &path, self.out)
    }

    /// Prints every not-yet-printed node from the table down to `id`.
    fn print_path(&mut self, id: NodeId) {
        let mut pending: Vec<NodeId> = self
            .ancestors(id)
            .take_while(|n| !self.arena[*n].outputted)
            .collect();
        pending.reverse();

        for node in pending {
            let node = &mut self.arena[node];
            node.outputted = true;
            let line = format!("{:indent$}{}", "", node.name, indent = node.level.depth() * 2);
            self.out.info(line);
        }
    }

    fn omitted(&mut self, family_id: NodeId, count: u64) {
        if !self.plan.to_output {
            return;
        }
        self.print_path(family_id);
        let indent = Level::Qualifier.depth() * 2;
        self.out
            .info(format!("{:indent$}... omitted {count} entries", ""));
    }

    /// Iterates from `id` up to its table, self first.
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |n| self.arena[*n].parent)
    }

    fn path_of(&self, id: NodeId) -> FoundPath {
        let mut names: Vec<String> = self
            .ancestors(id)
            .map(|n| self.arena[n].name.clone())
            .collect();
        names.reverse();
        FoundPath {
            level: self.arena[id].level,
            names,
        }
    }

    fn row_and_family(&self, family_id: NodeId) -> (String, String) {
        let family = &self.arena[family_id];
        let row = family
            .parent
            .map(|p| self.arena[p].name.clone())
            .unwrap_or_default();
        (row, family.name.clone())
    }
}
