//! Timed interpolation of a pixel position.
use raylib::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Decelerates into the target with a few diminishing bounces.
    BounceEnd,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::BounceEnd => bounce_end(t),
        }
    }
}

fn bounce_end(mut n: f32) -> f32 {
    const K: f32 = 7.5625;
    if n < 1.0 / 2.75 {
        K * n * n
    } else if n < 2.0 / 2.75 {
        n -= 1.5 / 2.75;
        K * n * n + 0.75
    } else if n < 2.5 / 2.75 {
        n -= 2.25 / 2.75;
        K * n * n + 0.9375
    } else {
        n -= 2.625 / 2.75;
        K * n * n + 0.984375
    }
}

#[derive(Clone, Debug)]
pub struct Tween {
    from: Vector2,
    to: Vector2,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: Vector2, to: Vector2, duration: f32, easing: Easing) -> Self {
        Self { from, to, duration: duration.max(f32::EPSILON), elapsed: 0.0, easing }
    }

    /// Moves the clock forward and returns the interpolated position.
    pub fn advance(&mut self, dt: f32) -> Vector2 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.position()
    }

    pub fn position(&self) -> Vector2 {
        if self.is_finished() {
            return self.to;
        }
        let k = self.easing.apply(self.elapsed / self.duration);
        Vector2::new(
            self.from.x + (self.to.x - self.from.x) * k,
            self.from.y + (self.to.y - self.from.y) * k,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
