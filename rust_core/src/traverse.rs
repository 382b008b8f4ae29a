use crate::error::{ModelError, Result};
use crate::graph::{Arg, ModelGraph, VarId};
use log::trace;

/// Every variable reachable from `root` through argument references,
/// depth-first pre-order, each variable exactly once.
///
/// Used by density evaluation, where the result is a sum and order does not
/// matter. Variables are marked visited before their arguments are walked,
/// so revisits — shared ancestors included — are pruned.
pub fn reachable(graph: &ModelGraph, root: VarId) -> Vec<VarId> {
    let mut visited = vec![false; graph.len()];
    let mut out = Vec::new();
    collect_pre(graph, root, &mut visited, &mut out);
    trace!("reachability pass collected {} variables", out.len());
    out
}

fn collect_pre(graph: &ModelGraph, id: VarId, visited: &mut [bool], out: &mut Vec<VarId>) {
    visited[id.0] = true;
    out.push(id);
    for arg in &graph.var(id).args {
        match *arg {
            Arg::Literal(_) => {}
            Arg::Latent(child) | Arg::Observed(child) => {
                if !visited[child.0] {
                    collect_pre(graph, child, visited, out);
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Grey,
    Black,
}

/// Every variable reachable from `root`, depth-first post-order: each
/// variable appears after all variables it depends on, exactly once.
///
/// Used by the samplers, which need parent values before a variable can be
/// drawn. The walk three-colors variables; re-entering a grey one means the
/// argument references form a cycle, reported as an error rather than left
/// to recurse unboundedly.
pub fn dependency_order(graph: &ModelGraph, root: VarId) -> Result<Vec<VarId>> {
    let mut colors = vec![Color::White; graph.len()];
    let mut out = Vec::new();
    collect_post(graph, root, &mut colors, &mut out)?;
    trace!("dependency pass ordered {} variables", out.len());
    Ok(out)
}

fn collect_post(
    graph: &ModelGraph,
    id: VarId,
    colors: &mut [Color],
    out: &mut Vec<VarId>,
) -> Result<()> {
    colors[id.0] = Color::Grey;
    for arg in &graph.var(id).args {
        match *arg {
            Arg::Literal(_) => {}
            Arg::Latent(child) | Arg::Observed(child) => match colors[child.0] {
                Color::White => collect_post(graph, child, colors, out)?,
                Color::Grey => {
                    return Err(ModelError::Cycle(graph.var(child).name.clone()));
                }
                Color::Black => {}
            },
        }
    }
    colors[id.0] = Color::Black;
    out.push(id);
    Ok(())
}
