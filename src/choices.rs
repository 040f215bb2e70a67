//! Fixed choice sets stored as short string codes.
//!
//! Each set maps to a `VARCHAR` column guarded by a `CHECK` constraint. The
//! demographic sets share the `"n"` code meaning "not specified", which is
//! distinct from the column being null (the item was skipped).

use crate::error::ModelError;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Code shared by every demographic set for "not specified".
pub const NOT_SPECIFIED: &str = "n";

macro_rules! choices {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $code:tt, $label:tt;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            AsExpression, FromSqlRow, Serialize, Deserialize,
        )]
        #[sql_type = "Text"]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored representation.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, ModelError> {
                match s {
                    $($code => Ok($name::$variant),)+
                    _ => Err(ModelError::InvalidChoice {
                        field: $field,
                        value: s.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
                <str as ToSql<Text, Pg>>::to_sql(self.code(), out)
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
                let code = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                code.parse().map_err(|e: ModelError| e.to_string().into())
            }
        }
    };
}

choices! {
    /// Response format of a structured question.
    QuestionType ("question type") {
        MultipleChoice => "multiple-choice", "Multiple Choice";
        TrueFalse => "true-false", "True/False";
        SelectMultiple => "select-multiple", "Select Multiple";
        Likert => "likert", "Likert";
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::MultipleChoice
    }
}

impl QuestionType {
    /// Whether a response may select more than one answer.
    pub fn allows_many(self) -> bool {
        self == QuestionType::SelectMultiple
    }
}

choices! {
    /// Gender identity.
    Gender ("gender") {
        NotSpecified => "n", "Not specified";
        Male => "male", "Male";
        Female => "female", "Female";
        Nonbinary => "nonbinary", "Nonbinary";
    }
}

choices! {
    /// Age class.
    Age ("age") {
        NotSpecified => "n", "Not specified";
        Under18 => "under-18", "Under 18.";
        From18To24 => "18-24", "18-24";
        From25To34 => "25-34", "25-35";
        From35To44 => "35-44", "36-44";
        From45To54 => "45-54", "45-54";
        From55To64 => "55-64", "55-64";
        Over65 => "65-plus", "65+.";
    }
}

choices! {
    /// Type of location the respondent calls home.
    Home ("home") {
        NotSpecified => "n", "Not specified";
        Urban => "urban", "Urban";
        Suburban => "suburban", "Suburban";
        Rural => "rural", "Rural";
    }
}
