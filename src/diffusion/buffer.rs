//! Square double buffer for one diffusion walk.
//!
//! Both planes are `(2 * steps + 1)^2` cells addressed by window offsets
//! `(u, v)` in `[-steps, steps]`. Each round reads the *active* plane, writes
//! the *inactive* plane and then swaps roles. Only the square of radius
//! `round + 1` is cleared before writing, which is exactly the area the round
//! can reach; cells beyond it are never read while the walk is shorter.

pub(crate) struct PingPong {
    planes: [Vec<f32>; 2],
    active: usize,
    steps: usize,
    side: usize,
}

impl PingPong {
    pub(crate) fn new() -> Self {
        Self {
            planes: [Vec::new(), Vec::new()],
            active: 0,
            steps: 0,
            side: 0,
        }
    }

    /// Resizes both planes for `steps`; a no-op when the size is unchanged.
    pub(crate) fn ensure(&mut self, steps: usize) {
        let side = 2 * steps + 1;
        if side != self.side {
            self.side = side;
            self.steps = steps;
            for plane in self.planes.iter_mut() {
                plane.clear();
                plane.resize(side * side, 0.0);
            }
        }
    }

    #[inline]
    fn index(&self, u: isize, v: isize) -> usize {
        let s = self.steps as isize;
        debug_assert!(u.abs() <= s && v.abs() <= s);
        ((v + s) as usize) * self.side + (u + s) as usize
    }

    /// Starts a new walk with unit mass at the centre of the active plane.
    pub(crate) fn seed(&mut self) {
        let centre = self.index(0, 0);
        self.planes[self.active][centre] = 1.0;
    }

    /// Zeroes the inactive plane within Chebyshev radius `radius`.
    pub(crate) fn clear_inactive(&mut self, radius: usize) {
        let r = radius.min(self.steps) as isize;
        let side = self.side;
        let s = self.steps as isize;
        let plane = &mut self.planes[1 - self.active];
        for v in -r..=r {
            let row = ((v + s) as usize) * side;
            let start = row + (s - r) as usize;
            let end = row + (s + r) as usize;
            plane[start..=end].fill(0.0);
        }
    }

    /// Value of the active plane at `(u, v)`.
    #[inline]
    pub(crate) fn active(&self, u: isize, v: isize) -> f32 {
        self.planes[self.active][self.index(u, v)]
    }

    /// Adds `value` to the inactive plane at `(u, v)`.
    #[inline]
    pub(crate) fn add_inactive(&mut self, u: isize, v: isize, value: f32) {
        let idx = self.index(u, v);
        self.planes[1 - self.active][idx] += value;
    }

    /// Makes the plane just written the active one.
    #[inline]
    pub(crate) fn swap(&mut self) {
        self.active = 1 - self.active;
    }
}
