use glam::DVec2;
use serde::Serialize;

/// In-flight size change. A settled border is a lerp with zero duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Lerp {
    from: f64,
    to: f64,
    start_millis: u64,
    duration_millis: u64,
}

/// Square world border centered on a point, with an optional size transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimBorder {
    center: DVec2,
    lerp: Lerp,
}

impl Default for SimBorder {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            lerp: Lerp {
                from: 1.0,
                to: 1.0,
                start_millis: 0,
                duration_millis: 0,
            },
        }
    }
}

impl SimBorder {
    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn set_center(&mut self, center: DVec2) {
        self.center = center;
    }

    /// Jump straight to `size`, cancelling any transition.
    pub fn set_size(&mut self, size: f64) {
        self.lerp = Lerp {
            from: size,
            to: size,
            start_millis: 0,
            duration_millis: 0,
        };
    }

    pub fn lerp_between(&mut self, from: f64, to: f64, now_millis: u64, duration_millis: u64) {
        self.lerp = Lerp {
            from,
            to,
            start_millis: now_millis,
            duration_millis,
        };
    }

    /// Size the transition is heading toward.
    pub fn target_size(&self) -> f64 {
        self.lerp.to
    }

    pub fn size_at(&self, now_millis: u64) -> f64 {
        let Lerp {
            from,
            to,
            start_millis,
            duration_millis,
        } = self.lerp;
        let elapsed = now_millis.saturating_sub(start_millis);
        if duration_millis == 0 || elapsed >= duration_millis {
            return to;
        }
        let t = elapsed as f64 / duration_millis as f64;
        from + (to - from) * t
    }

    pub fn is_moving(&self, now_millis: u64) -> bool {
        self.lerp.from != self.lerp.to
            && now_millis.saturating_sub(self.lerp.start_millis) < self.lerp.duration_millis
    }

    /// Signed distance from `pos` (x, z) to the nearest edge; negative outside.
    pub fn distance_to(&self, pos: DVec2, now_millis: u64) -> f64 {
        let half = self.size_at(now_millis) / 2.0;
        let min = self.center - DVec2::splat(half);
        let max = self.center + DVec2::splat(half);
        (pos.x - min.x)
            .min(max.x - pos.x)
            .min(pos.y - min.y)
            .min(max.y - pos.y)
    }
}
