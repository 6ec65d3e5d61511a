use crate::{Phase, Time};

/// Count down the break after a point; the next serve starts when it runs out
pub fn tick_point_pause(phase: &mut Phase, time: &Time) {
    if let Phase::PointPause { remaining } = phase {
        let left = *remaining - time.dt;
        if left <= 0.0 {
            *phase = Phase::Serving;
        } else {
            *remaining = left;
        }
    }
}
