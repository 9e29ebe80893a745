//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::fmt::{Display, Formatter};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One argument to a method or function call. Literals are carried as raw
/// JSON values; workspace references name a slot populated by an earlier
/// `PutLastInstructionOutputOnWorkspace`.
///
/// Wire form: a literal serializes as its bare JSON value, a workspace
/// reference as `{"Workspace": [bytes...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Workspace(Vec<u8>),
    Literal(Value),
}

impl Arg {
    pub fn workspace<T: AsRef<[u8]>>(key: T) -> Self {
        Self::Workspace(key.as_ref().to_vec())
    }

    pub fn literal<T: Serialize>(value: &T) -> Self {
        Self::Literal(serde_json::to_value(value).expect("argument serializes to JSON"))
    }

    pub fn as_workspace_key(&self) -> Option<&[u8]> {
        match self {
            Self::Workspace(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for Arg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Workspace(key) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Workspace", key)?;
                map.end()
            },
            Self::Literal(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Arg {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Object(map) if map.len() == 1 && map.contains_key("Workspace") => {
                let key = map
                    .get("Workspace")
                    .and_then(Value::as_array)
                    .ok_or_else(|| D::Error::custom("Workspace key must be a byte array"))?;
                let key = key
                    .iter()
                    .map(|b| {
                        b.as_u64()
                            .and_then(|b| u8::try_from(b).ok())
                            .ok_or_else(|| D::Error::custom("Workspace key must be a byte array"))
                    })
                    .collect::<Result<Vec<u8>, _>>()?;
                Ok(Self::Workspace(key))
            },
            _ => Ok(Self::Literal(value)),
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Workspace(key) => write!(f, "Workspace({})", String::from_utf8_lossy(key)),
            Self::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// Builds a `Vec<Arg>` from a comma-separated list. `Workspace(key)` items
/// become workspace references, everything else a literal:
///
/// ```
/// use tari_bridge_transaction::args;
/// let args = args![42, Workspace(b"bucket")];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::args::Arg>::new() };
    ($($rest:tt)+) => {{
        let mut __args = ::std::vec::Vec::<$crate::args::Arg>::new();
        $crate::__push_args!(__args; $($rest)+);
        __args
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __push_args {
    ($v:ident; Workspace($key:expr) $(, $($rest:tt)*)?) => {
        $v.push($crate::args::Arg::workspace($key));
        $($crate::__push_args!($v; $($rest)*);)?
    };
    ($v:ident; $e:expr $(, $($rest:tt)*)?) => {
        $v.push($crate::args::Arg::literal(&$e));
        $($crate::__push_args!($v; $($rest)*);)?
    };
    ($v:ident;) => {};
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tari_bridge_engine_types::amount::Amount;

    use super::*;

    #[test]
    fn literal_serializes_bare() {
        let arg = Arg::literal(&Amount::new(100));
        assert_eq!(serde_json::to_value(&arg).unwrap(), json!(100));
    }

    #[test]
    fn workspace_serializes_tagged() {
        let arg = Arg::workspace(b"bucket");
        assert_eq!(
            serde_json::to_value(&arg).unwrap(),
            json!({ "Workspace": [98, 117, 99, 107, 101, 116] })
        );
    }

    #[test]
    fn round_trips_both_variants() {
        for arg in [Arg::workspace(b"a_bucket"), Arg::literal(&"resource_00")] {
            let json = serde_json::to_value(&arg).unwrap();
            let back: Arg = serde_json::from_value(json).unwrap();
            assert_eq!(back, arg);
        }
    }

    #[test]
    fn args_macro_mixes_literals_and_workspace_refs() {
        let amount = Amount::new(5);
        let args = args![amount, Workspace(b"bucket"), "resource_00"];
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], Arg::literal(&Amount::new(5)));
        assert_eq!(args[1].as_workspace_key(), Some(&b"bucket"[..]));
    }

    #[test]
    fn empty_args_macro() {
        let args = args![];
        assert!(args.is_empty());
    }
}
