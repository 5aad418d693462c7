use super::stochastic::Parameter;
use std::fmt;
use std::sync::Arc;

/// Raw, user-facing configuration value.
///
/// Builders accept anything convertible into a `SpecInput` and resolve it
/// eagerly into a typed spec. The accepted shapes are:
///
/// | Input                    | Meaning                                   |
/// |--------------------------|-------------------------------------------|
/// | `12`, `0.5`              | fixed value                               |
/// | `(0, 2)`, `(0.1, 0.2)`   | inclusive range                           |
/// | `(t, r, b, l)`           | per-side values (pad/crop only)           |
/// | `vec![12, 14]`           | uniform choice between listed values      |
/// | `"keep"`, `"keep-aspect-ratio"` | keep a side / derive it from aspect ratio |
/// | `SpecInput::map(..)`     | independent `height` / `width` specs      |
/// | `SpecInput::param(..)`   | external stochastic parameter             |
#[derive(Clone)]
pub enum SpecInput {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Tuple(Vec<SpecInput>),
    List(Vec<SpecInput>),
    Map(Vec<(String, SpecInput)>),
    Param(Arc<dyn Parameter>),
}

impl SpecInput {
    pub fn param(param: impl Parameter + 'static) -> Self {
        SpecInput::Param(Arc::new(param))
    }

    /// Builds a `height`/`width` mapping. Keys are validated at resolve time.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<SpecInput>,
    {
        SpecInput::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short description used in "Expected ..., got ..." messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            SpecInput::Int(v) => format!("int {v}"),
            SpecInput::Float(v) => format!("float {v}"),
            SpecInput::Bool(v) => format!("bool {v}"),
            SpecInput::Str(s) => format!("string \"{s}\""),
            SpecInput::Tuple(items) => format!("tuple of length {}", items.len()),
            SpecInput::List(items) => format!("list of length {}", items.len()),
            SpecInput::Map(entries) => format!("mapping with {} entries", entries.len()),
            SpecInput::Param(p) => format!("parameter {p:?}"),
        }
    }
}

impl fmt::Debug for SpecInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecInput::Int(v) => write!(f, "{v}"),
            SpecInput::Float(v) => write!(f, "{v:?}"),
            SpecInput::Bool(v) => write!(f, "{v}"),
            SpecInput::Str(s) => write!(f, "{s:?}"),
            SpecInput::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(|i| format!("{i:?}")).collect();
                write!(f, "({})", parts.join(", "))
            }
            SpecInput::List(items) => f.debug_list().entries(items).finish(),
            SpecInput::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
            SpecInput::Param(p) => write!(f, "{p:?}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for SpecInput {
            fn from(v: $t) -> Self {
                SpecInput::Int(v as i64)
            }
        })*
    };
}

impl_from_int!(i32, i64, u8, u32, usize);

impl From<f64> for SpecInput {
    fn from(v: f64) -> Self {
        SpecInput::Float(v)
    }
}

impl From<f32> for SpecInput {
    fn from(v: f32) -> Self {
        SpecInput::Float(f64::from(v))
    }
}

impl From<bool> for SpecInput {
    fn from(v: bool) -> Self {
        SpecInput::Bool(v)
    }
}

impl From<&str> for SpecInput {
    fn from(v: &str) -> Self {
        SpecInput::Str(v.to_string())
    }
}

impl From<String> for SpecInput {
    fn from(v: String) -> Self {
        SpecInput::Str(v)
    }
}

impl From<Arc<dyn Parameter>> for SpecInput {
    fn from(p: Arc<dyn Parameter>) -> Self {
        SpecInput::Param(p)
    }
}

impl<T: Into<SpecInput>> From<Vec<T>> for SpecInput {
    fn from(items: Vec<T>) -> Self {
        SpecInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<SpecInput>, B: Into<SpecInput>> From<(A, B)> for SpecInput {
    fn from((a, b): (A, B)) -> Self {
        SpecInput::Tuple(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for SpecInput
where
    A: Into<SpecInput>,
    B: Into<SpecInput>,
    C: Into<SpecInput>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        SpecInput::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for SpecInput
where
    A: Into<SpecInput>,
    B: Into<SpecInput>,
    C: Into<SpecInput>,
    D: Into<SpecInput>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        SpecInput::Tuple(vec![a.into(), b.into(), c.into(), d.into()])
    }
}
