//! Frame and tick telemetry through Micromegas.

use bevy::prelude::*;
use micromegas_tracing::prelude::{fmetric, imetric, span_scope};

use crate::control::chase::ChaseState;

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Last, frame_telemetry);
        app.add_systems(FixedLast, chase_telemetry);
    }
}

fn frame_telemetry(time: Res<Time>) {
    span_scope!("frame");
    let dt_ms = time.delta_secs_f64() * 1000.0;
    fmetric!("frame_time_ms", "ms", dt_ms);
}

fn chase_telemetry(slimes: Query<&ChaseState>) {
    let chasing = slimes.iter().filter(|state| state.is_chasing()).count();
    imetric!("slimes_chasing", "count", chasing as u64);
}
