//! Configuration inputs and their resolved, sampleable forms.
//!
//! ```text
//! parameters/
//! ├── input.rs       → SpecInput: what builders accept
//! ├── resolve.rs     → SizeSpec / PerSideSpec / ScaleSpec / ChoiceSpec
//! ├── position.rs    → Position presets for fixed-size pad/crop
//! └── stochastic.rs  → external Parameter trait + built-ins
//! ```

pub mod input;
pub mod position;
pub mod resolve;
pub mod stochastic;

pub use input::SpecInput;
pub use position::{Position, PositionSpec};
pub use resolve::{
    resolve, resolve_choice, resolve_per_side, resolve_scale, Categorical, ChoiceSpec,
    NumericKind, PerSideSpec, ScaleSpec, SizeSpec, SpecContext,
};
pub use stochastic::{Choice, Deterministic, DiscreteUniform, Parameter, Uniform, Value};
