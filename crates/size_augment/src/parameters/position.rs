use crate::error::{AugmentError, Result};
use rand::Rng;

/// Where the size difference goes when padding/cropping to a fixed size.
///
/// `x`/`y` are the share of the slack placed on the left/top side.
/// `0.0` keeps the image flush left/top, `1.0` flush right/bottom and `0.5`
/// centers it (the min side receives the floor of an odd split).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)) {
            return Err(AugmentError::expected(
                "position fractions to be in [0.0, 1.0]",
                format!("({x}, {y})"),
            ));
        }
        Ok(Self { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionSpec {
    /// `x` and `y` drawn uniformly from `[0, 1]` for every item.
    #[default]
    Uniform,
    Fixed(Position),
}

impl From<Position> for PositionSpec {
    fn from(position: Position) -> Self {
        PositionSpec::Fixed(position)
    }
}

impl PositionSpec {
    /// Named presets: `"uniform"`, `"center"`, and `"{left,center,right}-{top,center,bottom}"`.
    pub fn named(name: &str) -> Result<Self> {
        if name == "uniform" {
            return Ok(PositionSpec::Uniform);
        }
        if name == "center" {
            return Ok(PositionSpec::Fixed(Position::CENTER));
        }
        let reject = || {
            AugmentError::expected(
                "position to be \"uniform\", \"center\" or \"<left|center|right>-<top|center|bottom>\"",
                format!("\"{name}\""),
            )
        };
        let (horizontal, vertical) = name.split_once('-').ok_or_else(reject)?;
        let x = match horizontal {
            "left" => 0.0,
            "center" => 0.5,
            "right" => 1.0,
            _ => return Err(reject()),
        };
        let y = match vertical {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            _ => return Err(reject()),
        };
        Ok(PositionSpec::Fixed(Position { x, y }))
    }

    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        match self {
            PositionSpec::Uniform => Position {
                x: rng.random_range(0.0..=1.0),
                y: rng.random_range(0.0..=1.0),
            },
            PositionSpec::Fixed(position) => *position,
        }
    }
}
