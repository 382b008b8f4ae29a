use crate::distributions::Distribution;
use crate::error::{ModelError, Result};
use crate::graph::{Arg, Kind, ModelGraph, VarId};
use crate::traverse::dependency_order;
use log::debug;
use rand::Rng;
use std::collections::HashMap;

/// Resolve a variable's distribution parameters against the per-call value
/// table. Dependency ordering guarantees every parent slot is already
/// filled when its child is visited.
fn resolve_params(graph: &ModelGraph, id: VarId, values: &[f64]) -> Vec<f64> {
    graph
        .var(id)
        .args
        .iter()
        .map(|arg| match *arg {
            Arg::Literal(v) => v,
            // During sampling every variable reference resolves through the
            // value table — an observed variable's recorded value is never
            // consulted here.
            Arg::Latent(parent) | Arg::Observed(parent) => values[parent.0],
        })
        .collect()
}

/// Draw one value of `root` from the model's prior joint distribution.
///
/// Ancestral sampling: variables are generated in dependency order, each
/// drawn from its distribution with parent values already realized. Observed
/// variables are regenerated like any other — their recorded values do not
/// constrain the draw. Repeated calls with independent RNG state are i.i.d.
/// prior draws.
pub fn prior_sample<R: Rng>(graph: &ModelGraph, root: VarId, rng: &mut R) -> Result<f64> {
    let order = dependency_order(graph, root)?;
    debug!(
        "prior sampling {} variables rooted at `{}`",
        order.len(),
        graph.var(root).name
    );

    let mut values = vec![f64::NAN; graph.len()];
    for &id in &order {
        let dist_params = resolve_params(graph, id, &values);
        let var = graph.var(id);
        values[id.0] = var.dist.sample(&dist_params, rng)?;
    }

    Ok(values[root.0])
}

/// Draw one value of `root` with every latent variable pinned to its entry
/// in `latent_values`.
///
/// Posterior-predictive simulation given externally supplied latents (e.g.
/// from a separate inference procedure): latent variables copy their given
/// values unchanged, observed variables are regenerated from their
/// distributions conditioned on those values. This is forward simulation,
/// not inference over the latents.
pub fn posterior_sample<R: Rng>(
    graph: &ModelGraph,
    root: VarId,
    latent_values: &HashMap<String, f64>,
    rng: &mut R,
) -> Result<f64> {
    let order = dependency_order(graph, root)?;
    debug!(
        "posterior-predictive sampling {} variables rooted at `{}`",
        order.len(),
        graph.var(root).name
    );

    let mut values = vec![f64::NAN; graph.len()];
    for &id in &order {
        let dist_params = resolve_params(graph, id, &values);
        let var = graph.var(id);
        values[id.0] = match var.kind {
            Kind::Latent => latent_values
                .get(&var.name)
                .copied()
                .ok_or_else(|| ModelError::MissingLatent(var.name.clone()))?,
            Kind::Observed(_) => var.dist.sample(&dist_params, rng)?,
        };
    }

    Ok(values[root.0])
}
