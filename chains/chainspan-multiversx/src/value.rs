use num_bigint::{BigInt, BigUint};

/// A value that can live nested inside any composite: the MultiversX
/// "single value" universe.
///
/// Composites carry the empty prototype of their element shape, so that a
/// fresh element can be produced whenever the element count only becomes
/// known while decoding ([`SingleValue::fresh`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleValue {
    /// Unsigned 8-bit integer
    U8(u8),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Unsigned 64-bit integer
    U64(u64),
    /// Arbitrary-width unsigned integer
    BigUint(BigUint),
    /// Signed 8-bit integer
    I8(i8),
    /// Signed 16-bit integer
    I16(i16),
    /// Signed 32-bit integer
    I32(i32),
    /// Signed 64-bit integer
    I64(i64),
    /// Arbitrary-width signed integer
    BigInt(BigInt),
    /// Boolean
    Bool(bool),
    /// Raw bytes; token identifiers share this shape on the wire
    Bytes(Vec<u8>),
    /// 32-byte MultiversX address
    Address(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic-length homogeneous sequence
    List {
        /// Empty element shape
        prototype: Box<SingleValue>,
        /// The held elements
        items: Vec<SingleValue>,
    },
    /// Fixed-length homogeneous sequence
    Array {
        /// The required element count
        size: usize,
        /// Empty element shape
        prototype: Box<SingleValue>,
        /// The held elements; exactly `size` of them once populated
        items: Vec<SingleValue>,
    },
    /// Ordered heterogeneous fields
    Struct {
        /// The field values, in declaration order
        fields: Vec<SingleValue>,
    },
    /// Nullable single value; `inner` keeps the shape even while unset
    Option {
        /// The payload slot
        inner: Box<SingleValue>,
        /// Whether the payload is present
        is_set: bool,
    },
}

impl SingleValue {
    /// An empty clone: same shape, zero content. Composites reset their
    /// element lists and clone prototypes recursively.
    pub fn fresh(&self) -> SingleValue {
        match self {
            SingleValue::U8(_) => SingleValue::U8(0),
            SingleValue::U16(_) => SingleValue::U16(0),
            SingleValue::U32(_) => SingleValue::U32(0),
            SingleValue::U64(_) => SingleValue::U64(0),
            SingleValue::BigUint(_) => SingleValue::BigUint(BigUint::default()),
            SingleValue::I8(_) => SingleValue::I8(0),
            SingleValue::I16(_) => SingleValue::I16(0),
            SingleValue::I32(_) => SingleValue::I32(0),
            SingleValue::I64(_) => SingleValue::I64(0),
            SingleValue::BigInt(_) => SingleValue::BigInt(BigInt::default()),
            SingleValue::Bool(_) => SingleValue::Bool(false),
            SingleValue::Bytes(_) => SingleValue::Bytes(Vec::new()),
            SingleValue::Address(_) => SingleValue::Address(Vec::new()),
            SingleValue::String(_) => SingleValue::String(String::new()),
            SingleValue::List { prototype, .. } => SingleValue::List {
                prototype: prototype.clone(),
                items: Vec::new(),
            },
            SingleValue::Array { size, prototype, .. } => SingleValue::Array {
                size: *size,
                prototype: prototype.clone(),
                items: Vec::new(),
            },
            SingleValue::Struct { fields } => SingleValue::Struct {
                fields: fields.iter().map(SingleValue::fresh).collect(),
            },
            SingleValue::Option { inner, .. } => SingleValue::Option {
                inner: Box::new(inner.fresh()),
                is_set: false,
            },
        }
    }

    /// A short tag naming this value's kind, for error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            SingleValue::U8(_) => "u8",
            SingleValue::U16(_) => "u16",
            SingleValue::U32(_) => "u32",
            SingleValue::U64(_) => "u64",
            SingleValue::BigUint(_) => "BigUint",
            SingleValue::I8(_) => "i8",
            SingleValue::I16(_) => "i16",
            SingleValue::I32(_) => "i32",
            SingleValue::I64(_) => "i64",
            SingleValue::BigInt(_) => "BigInt",
            SingleValue::Bool(_) => "bool",
            SingleValue::Bytes(_) => "bytes",
            SingleValue::Address(_) => "Address",
            SingleValue::String(_) => "utf-8 string",
            SingleValue::List { .. } => "List",
            SingleValue::Array { .. } => "array",
            SingleValue::Struct { .. } => "tuple",
            SingleValue::Option { .. } => "Option",
        }
    }
}

/// A top-level call argument: either a single value or one of the
/// constructs that only exist at the boundary of the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopValue {
    /// A plain single value occupying one part
    Single(SingleValue),
    /// Nullable trailing argument; contributes zero or one part
    Optional {
        /// The payload slot
        inner: Box<TopValue>,
        /// Whether the payload is present
        is_set: bool,
    },
    /// Trailing sequence, one part per element
    Variadic {
        /// Empty element shape
        prototype: Box<TopValue>,
        /// The held elements
        items: Vec<TopValue>,
    },
    /// A fixed heterogeneous group spread across several parts
    Multi {
        /// The grouped arguments
        items: Vec<TopValue>,
    },
}

impl TopValue {
    /// An empty clone of the same shape; see [`SingleValue::fresh`].
    pub fn fresh(&self) -> TopValue {
        match self {
            TopValue::Single(value) => TopValue::Single(value.fresh()),
            TopValue::Optional { inner, .. } => TopValue::Optional {
                inner: Box::new(inner.fresh()),
                is_set: false,
            },
            TopValue::Variadic { prototype, .. } => TopValue::Variadic {
                prototype: prototype.clone(),
                items: Vec::new(),
            },
            TopValue::Multi { items } => TopValue::Multi {
                items: items.iter().map(TopValue::fresh).collect(),
            },
        }
    }

    /// A short tag naming this argument's kind, for error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            TopValue::Single(value) => value.kind(),
            TopValue::Optional { .. } => "optional",
            TopValue::Variadic { .. } => "variadic",
            TopValue::Multi { .. } => "multi",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn populated_values() -> Vec<TopValue> {
        vec![
            TopValue::Single(SingleValue::U64(4)),
            TopValue::Single(SingleValue::BigUint(BigUint::from(5u8))),
            TopValue::Single(SingleValue::String("populated".to_owned())),
            TopValue::Single(SingleValue::List {
                prototype: Box::new(SingleValue::U8(0)),
                items: vec![SingleValue::U8(1), SingleValue::U8(2)],
            }),
            TopValue::Single(SingleValue::Array {
                size: 2,
                prototype: Box::new(SingleValue::Bool(false)),
                items: vec![SingleValue::Bool(true), SingleValue::Bool(true)],
            }),
            TopValue::Single(SingleValue::Struct {
                fields: vec![SingleValue::U8(7), SingleValue::Bytes(vec![8])],
            }),
            TopValue::Single(SingleValue::Option {
                inner: Box::new(SingleValue::U8(9)),
                is_set: true,
            }),
            TopValue::Optional {
                inner: Box::new(TopValue::Single(SingleValue::U8(10))),
                is_set: true,
            },
            TopValue::Variadic {
                prototype: Box::new(TopValue::Single(SingleValue::U8(0))),
                items: vec![TopValue::Single(SingleValue::U8(11))],
            },
            TopValue::Multi {
                items: vec![
                    TopValue::Single(SingleValue::U8(12)),
                    TopValue::Single(SingleValue::String("multi".to_owned())),
                ],
            },
        ]
    }

    #[test]
    fn fresh_clones_are_empty_but_keep_the_shape() {
        for value in populated_values() {
            let fresh = value.fresh();
            assert_eq!(fresh.kind(), value.kind());
            assert_eq!(fresh, fresh.fresh(), "fresh must be idempotent");
            assert_ne!(fresh, value, "{} clone still holds data", value.kind());
        }
    }

    #[test]
    fn fresh_list_keeps_its_prototype() {
        let list = SingleValue::List {
            prototype: Box::new(SingleValue::Struct {
                fields: vec![SingleValue::U32(0), SingleValue::Address(Vec::new())],
            }),
            items: vec![],
        };
        match list.fresh() {
            SingleValue::List { prototype, items } => {
                assert!(items.is_empty());
                assert_eq!(prototype.kind(), "tuple");
            }
            other => panic!("unexpected clone: {other:?}"),
        }
    }
}
