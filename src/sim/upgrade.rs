//! Body-collection schema upgrades
//!
//! Collections that come from outside `init` (restored snapshots, host-built lists) may
//! predate the current layout. `upgrade` brings them forward once and stamps the version.

use glam::DVec2;

use super::arena::BodyArena;
use super::body::Sprite;
use super::labs::rain;
use super::scenario::ScenarioId;
use crate::consts::CLOUD_COUNT;

/// Current body layout version.
///
/// - 0: unversioned; rain may be missing its background clouds
/// - 1: rain always carries exactly `CLOUD_COUNT` clouds
pub const SCHEMA_VERSION: u32 = 1;

/// Upgrade `bodies` for `scenario`. Returns true if bodies were added or removed.
pub fn upgrade(bodies: &mut BodyArena, scenario: ScenarioId) -> bool {
    let from = bodies.schema();
    if from >= SCHEMA_VERSION {
        return false;
    }

    let changed = match scenario {
        ScenarioId::Rain => backfill_clouds(bodies),
        _ => false,
    };
    bodies.set_schema(SCHEMA_VERSION);
    log::debug!(
        "upgraded {} bodies from schema {} to {} (changed: {})",
        scenario,
        from,
        SCHEMA_VERSION,
        changed
    );
    changed
}

/// Replace a partial cloud set with the standard five, placed around the man
fn backfill_clouds(bodies: &mut BodyArena) -> bool {
    let clouds = bodies.iter().filter(|b| b.is_cloud()).count();
    if clouds >= CLOUD_COUNT {
        return false;
    }
    let Some(man) = bodies.iter().find(|b| b.sprite == Sprite::Man).map(|b| b.pos) else {
        return false;
    };

    bodies.retain(|b| !b.is_cloud());
    for cloud in rain::clouds(man - DVec2::new(0.0, rain::MAN_DROP), 0.0) {
        if let Err(err) = bodies.push(cloud) {
            log::warn!("cloud backfill stopped early: {err}");
            break;
        }
    }
    true
}
