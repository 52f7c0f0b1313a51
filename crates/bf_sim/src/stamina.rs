//! Stamina pool shared with the HUD. The simulation only asks to spend or
//! regenerate; the pool itself owns the bounds.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamina {
    current: f32,
    max: f32,
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Spends `cost` if the pool can cover it. Returns false and leaves the
    /// pool untouched otherwise.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if self.current + f32::EPSILON < cost {
            return false;
        }
        self.current = (self.current - cost).max(0.0);
        true
    }

    pub fn regen(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}
