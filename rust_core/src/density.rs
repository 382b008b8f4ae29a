use crate::distributions::Distribution;
use crate::error::{ModelError, Result};
use crate::graph::{Arg, Kind, ModelGraph, VarId};
use crate::traverse::reachable;
use log::debug;
use std::collections::HashMap;

fn latent_value(latent_values: &HashMap<String, f64>, name: &str) -> Result<f64> {
    latent_values
        .get(name)
        .copied()
        .ok_or_else(|| ModelError::MissingLatent(name.to_string()))
}

/// Joint log-density of `root` and all its ancestors, `log p(latents,
/// observations)`, decomposed over the DAG as the sum of each variable's
/// conditional log-density given its parents.
///
/// `latent_values` must hold an entry for every latent variable reachable
/// from `root`; observed variables contribute their recorded values. The
/// result may be any real number or negative infinity.
pub fn evaluate_log_density(
    graph: &ModelGraph,
    root: VarId,
    latent_values: &HashMap<String, f64>,
) -> Result<f64> {
    let vars = reachable(graph, root);
    debug!(
        "evaluating joint log-density over {} variables rooted at `{}`",
        vars.len(),
        graph.var(root).name
    );

    let mut log_density = 0.0;
    for &id in &vars {
        let var = graph.var(id);

        let mut dist_params = Vec::with_capacity(var.args.len());
        for arg in &var.args {
            let value = match *arg {
                Arg::Literal(v) => v,
                Arg::Latent(parent) => latent_value(latent_values, &graph.var(parent).name)?,
                Arg::Observed(parent) => graph.var(parent).observed_value(),
            };
            dist_params.push(value);
        }

        let point = match var.kind {
            Kind::Latent => latent_value(latent_values, &var.name)?,
            Kind::Observed(v) => v,
        };

        log_density += var.dist.log_density(point, &dist_params)?;
    }

    Ok(log_density)
}
