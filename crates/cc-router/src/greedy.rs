//! Policy `G` — longest-idle pool on arrival, oldest queue head on completion.

use cc_core::{ClassId, PoolId};

use crate::{RouteCtx, RoutePolicy};

/// The fair-share routing rule.
///
/// Arrivals go to the compatible available pool whose longest-idle agent has
/// been idle longest (smallest pool idle rank); completions serve the
/// compatible class whose queue head has waited longest (smallest head
/// arrival tick).  Both scans keep the first minimum, so ties break to the
/// lower pool / class index.
pub struct LongestIdle;

impl RoutePolicy for LongestIdle {
    fn key(&self) -> &'static str {
        "G"
    }

    fn pool_for_arrival(&self, class: ClassId, ctx: &RouteCtx<'_>) -> Option<PoolId> {
        ctx.scenario
            .pools_for_class(class)
            .iter()
            .copied()
            .filter(|pool| ctx.pools[pool.index()].is_available())
            .min_by_key(|pool| ctx.pools[pool.index()].idle_rank())
    }

    fn class_for_completion(&self, pool: PoolId, ctx: &RouteCtx<'_>) -> Option<ClassId> {
        ctx.scenario
            .classes_for_pool(pool)
            .iter()
            .copied()
            .filter_map(|class| ctx.queues.head(class).map(|head| (class, head.arrival)))
            .min_by_key(|&(_, arrival)| arrival)
            .map(|(class, _)| class)
    }
}
