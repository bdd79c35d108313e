use crate::{decode_top_level, encode_top_level, CodecError, TopValue};

/// The parts-based wire (de)serializer: one part per top-level argument,
/// variadic arguments fanning out to one part per item, optional
/// arguments contributing zero or one trailing part.
#[derive(Debug, Clone)]
pub struct Serializer {
    parts_separator: String,
}

impl Serializer {
    /// A serializer joining string-form parts with `parts_separator`.
    pub fn new(parts_separator: impl Into<String>) -> Result<Self, CodecError> {
        let parts_separator = parts_separator.into();
        if parts_separator.is_empty() {
            return Err(CodecError::EmptyPartsSeparator);
        }
        Ok(Self { parts_separator })
    }

    /// Serializes the arguments into the hex string wire form.
    pub fn serialize(&self, values: &[TopValue]) -> Result<String, CodecError> {
        let parts = self.serialize_to_parts(values)?;
        Ok(parts
            .iter()
            .map(hex::encode)
            .collect::<Vec<_>>()
            .join(&self.parts_separator))
    }

    /// Deserializes the hex string wire form into the argument slots.
    pub fn deserialize(&self, joined: &str, values: &mut [TopValue]) -> Result<(), CodecError> {
        let parts = joined
            .split(&self.parts_separator)
            .map(|part| hex::decode(part).map_err(|_| CodecError::InvalidHexPart))
            .collect::<Result<Vec<_>, _>>()?;
        self.deserialize_parts(&parts, values)
    }

    /// Serializes the arguments into raw byte parts.
    pub fn serialize_to_parts(&self, values: &[TopValue]) -> Result<Vec<Vec<u8>>, CodecError> {
        let mut parts = Vec::with_capacity(values.len());
        for (position, value) in values.iter().enumerate() {
            check_last_position(value, position, values.len())?;
            serialize_value(value, &mut parts)?;
        }
        Ok(parts)
    }

    /// Deserializes raw byte parts into the argument slots; every part
    /// must be consumed.
    pub fn deserialize_parts(
        &self,
        parts: &[Vec<u8>],
        values: &mut [TopValue],
    ) -> Result<(), CodecError> {
        let count = values.len();
        let cursor = &mut &parts[..];
        for (position, value) in values.iter_mut().enumerate() {
            check_last_position(value, position, count)?;
            deserialize_value(value, cursor)?;
        }
        if !cursor.is_empty() {
            return Err(CodecError::TooManyParts);
        }
        Ok(())
    }
}

// Variadic and optional arguments swallow the rest of the part list, so
// anything after them would be unreachable.
fn check_last_position(value: &TopValue, position: usize, count: usize) -> Result<(), CodecError> {
    let is_last = position + 1 == count;
    match value {
        TopValue::Variadic { .. } | TopValue::Optional { .. } if !is_last => {
            Err(CodecError::ArgumentNotLast(value.kind()))
        }
        _ => Ok(()),
    }
}

fn serialize_value(value: &TopValue, parts: &mut Vec<Vec<u8>>) -> Result<(), CodecError> {
    match value {
        TopValue::Single(single) => parts.push(encode_top_level(single)?),
        TopValue::Optional { inner, is_set } => {
            if *is_set {
                serialize_value(inner, parts)?;
            }
        }
        TopValue::Variadic { items, .. } => {
            for item in items {
                serialize_value(item, parts)?;
            }
        }
        TopValue::Multi { items } => {
            for item in items {
                serialize_value(item, parts)?;
            }
        }
    }
    Ok(())
}

fn deserialize_value(value: &mut TopValue, cursor: &mut &[Vec<u8>]) -> Result<(), CodecError> {
    match value {
        TopValue::Single(single) => {
            let part = take_part(cursor)?;
            decode_top_level(single, part)?;
        }
        TopValue::Optional { inner, is_set } => {
            if cursor.is_empty() {
                *is_set = false;
            } else {
                deserialize_value(inner, cursor)?;
                *is_set = true;
            }
        }
        TopValue::Variadic { prototype, items } => {
            items.clear();
            while !cursor.is_empty() {
                let mut item = prototype.fresh();
                deserialize_value(&mut item, cursor)?;
                items.push(item);
            }
        }
        TopValue::Multi { items } => {
            for item in items {
                deserialize_value(item, cursor)?;
            }
        }
    }
    Ok(())
}

fn take_part<'a>(cursor: &mut &'a [Vec<u8>]) -> Result<&'a [u8], CodecError> {
    let (part, rest) = cursor.split_first().ok_or(CodecError::TooFewParts)?;
    *cursor = rest;
    Ok(part)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{SingleValue, PARTS_SEPARATOR};
    use num_bigint::BigUint;

    fn serializer() -> Serializer {
        Serializer::new(PARTS_SEPARATOR).unwrap()
    }

    fn scalar_values() -> Vec<TopValue> {
        vec![
            TopValue::Single(SingleValue::U8(5)),
            TopValue::Single(SingleValue::BigUint(BigUint::from(255u32))),
            TopValue::Single(SingleValue::Bool(true)),
            TopValue::Single(SingleValue::String("hi".to_owned())),
        ]
    }

    #[test]
    fn rejects_an_empty_separator() {
        assert!(matches!(
            Serializer::new(""),
            Err(CodecError::EmptyPartsSeparator)
        ));
    }

    #[test]
    fn scalars_serialize_one_part_each() {
        let parts = serializer().serialize_to_parts(&scalar_values()).unwrap();
        assert_eq!(
            parts,
            vec![vec![0x05], vec![0xff], vec![0x01], b"hi".to_vec()]
        );

        let mut slots: Vec<_> = scalar_values().iter().map(TopValue::fresh).collect();
        serializer().deserialize_parts(&parts, &mut slots).unwrap();
        assert_eq!(slots, scalar_values());
    }

    #[test]
    fn string_form_joins_hex_parts() {
        let joined = serializer().serialize(&scalar_values()).unwrap();
        assert_eq!(joined, "05@ff@01@6869");

        let mut slots: Vec<_> = scalar_values().iter().map(TopValue::fresh).collect();
        serializer().deserialize(&joined, &mut slots).unwrap();
        assert_eq!(slots, scalar_values());
    }

    #[test]
    fn variadic_arguments_fan_out_to_parts() {
        let variadic = vec![TopValue::Variadic {
            prototype: Box::new(TopValue::Single(SingleValue::U16(0))),
            items: vec![
                TopValue::Single(SingleValue::U16(1)),
                TopValue::Single(SingleValue::U16(2)),
                TopValue::Single(SingleValue::U16(3)),
            ],
        }];
        let parts = serializer().serialize_to_parts(&variadic).unwrap();
        assert_eq!(parts, vec![vec![0x01], vec![0x02], vec![0x03]]);

        let mut slots: Vec<_> = variadic.iter().map(TopValue::fresh).collect();
        serializer().deserialize_parts(&parts, &mut slots).unwrap();
        assert_eq!(slots, variadic);
    }

    #[test]
    fn optional_arguments_may_be_missing() {
        let values = vec![
            TopValue::Single(SingleValue::U8(1)),
            TopValue::Optional {
                inner: Box::new(TopValue::Single(SingleValue::U8(0))),
                is_set: false,
            },
        ];

        let parts = serializer().serialize_to_parts(&values).unwrap();
        assert_eq!(parts.len(), 1);

        let mut slots: Vec<_> = values.iter().map(TopValue::fresh).collect();
        serializer().deserialize_parts(&parts, &mut slots).unwrap();
        assert!(matches!(slots[1], TopValue::Optional { is_set: false, .. }));

        let mut slots: Vec<_> = values.iter().map(TopValue::fresh).collect();
        serializer()
            .deserialize_parts(&[vec![0x01], vec![0x07]], &mut slots)
            .unwrap();
        match &slots[1] {
            TopValue::Optional { inner, is_set: true } => {
                assert_eq!(**inner, TopValue::Single(SingleValue::U8(7)));
            }
            other => panic!("unexpected slot: {other:?}"),
        }
    }

    #[test]
    fn trailing_only_arguments_must_be_last() {
        let values = vec![
            TopValue::Variadic {
                prototype: Box::new(TopValue::Single(SingleValue::U8(0))),
                items: vec![],
            },
            TopValue::Single(SingleValue::U8(1)),
        ];
        assert_eq!(
            serializer().serialize_to_parts(&values),
            Err(CodecError::ArgumentNotLast("variadic"))
        );
    }

    #[test]
    fn part_count_mismatches_are_typed_errors() {
        let mut slots = vec![TopValue::Single(SingleValue::U8(0))];
        assert_eq!(
            serializer().deserialize_parts(&[], &mut slots),
            Err(CodecError::TooFewParts)
        );
        assert_eq!(
            serializer().deserialize_parts(&[vec![1], vec![2]], &mut slots),
            Err(CodecError::TooManyParts)
        );
    }

    #[test]
    fn multi_arguments_spread_across_parts() {
        let values = vec![TopValue::Multi {
            items: vec![
                TopValue::Single(SingleValue::U8(1)),
                TopValue::Single(SingleValue::String("x".to_owned())),
            ],
        }];
        let parts = serializer().serialize_to_parts(&values).unwrap();
        assert_eq!(parts, vec![vec![0x01], b"x".to_vec()]);

        let mut slots: Vec<_> = values.iter().map(TopValue::fresh).collect();
        serializer().deserialize_parts(&parts, &mut slots).unwrap();
        assert_eq!(slots, values);
    }
}
