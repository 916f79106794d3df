/// An axis-aligned rectangle in pixel coordinates, optionally tagged with
/// the external tracker's identity for the subject it bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub track_id: Option<u32>,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            track_id: None,
        }
    }

    pub fn with_track_id(mut self, track_id: u32) -> Self {
        self.track_id = Some(track_id);
        self
    }

    /// Builds the box around a centre point the way the tracker reports it
    /// (`x, y` = centre), truncating each edge toward zero.
    pub fn from_center(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        let left = (cx - w / 2.0) as i32;
        let top = (cy - h / 2.0) as i32;
        let right = (cx + w / 2.0) as i32;
        let bottom = (cy + h / 2.0) as i32;
        Self::new(
            left,
            top,
            saturate(right as i64 - left as i64),
            saturate(bottom as i64 - top as i64),
        )
    }

    /// Exclusive right edge, widened so it cannot overflow.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge, widened so it cannot overflow.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with a `width` x `height` frame. May come out degenerate
    /// when the region lies entirely outside.
    pub fn clamped_to(&self, width: u32, height: u32) -> Region {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(width as i64);
        let y2 = self.bottom().min(height as i64);
        Region {
            x: x1,
            y: y1,
            width: saturate(x2 - x1 as i64),
            height: saturate(y2 - y1 as i64),
            track_id: self.track_id,
        }
    }

    /// Picks the most prominent region: maximum area, first occurrence wins
    /// ties. Degenerate regions are never selected.
    pub fn select_largest(regions: &[Region]) -> Option<Region> {
        let mut best: Option<Region> = None;
        for r in regions.iter().filter(|r| !r.is_degenerate()) {
            match best {
                Some(b) if r.area() <= b.area() => {}
                _ => best = Some(*r),
            }
        }
        best
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
