use serde::Serialize;

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if fields.len() != 4 {
            return None;
        }
        Some(Self {
            x1: fields[0].trim().parse().ok()?,
            y1: fields[1].trim().parse().ok()?,
            x2: fields[2].trim().parse().ok()?,
            y2: fields[3].trim().parse().ok()?,
        })
    }
}
