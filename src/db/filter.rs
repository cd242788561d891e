//! Caller-supplied filter values and their validation against the vocabularies.

use crate::error::{Error, Result};

use super::choices::{
    Choice, Expression, Gender, Group, Illumination, Occlusion, ProtocolName, Purpose, Session,
};
use super::plan::ValidatedQuery;

/// A filter argument: nothing, a single value, or a list of values.
///
/// An empty `Many` behaves like `Unset` during validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    Unset,
    One(T),
    Many(Vec<T>),
}

impl<T> Filter<T> {
    /// The given values as a slice; a scalar is a one-element slice.
    pub fn values(&self) -> &[T] {
        match self {
            Filter::Unset => &[],
            Filter::One(v) => std::slice::from_ref(v),
            Filter::Many(v) => v,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Filter::Unset)
    }
}

impl<T> From<Vec<T>> for Filter<T> {
    fn from(values: Vec<T>) -> Self {
        Filter::Many(values)
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Filter::One(v),
            None => Filter::Unset,
        }
    }
}

impl From<&str> for Filter<String> {
    fn from(value: &str) -> Self {
        Filter::One(value.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for Filter<String> {
    fn from(values: [&str; N]) -> Self {
        Filter::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

fn parse<T: Choice>(value: &str) -> Result<T> {
    T::from_str(value).ok_or_else(|| Error::InvalidArgument {
        field: T::FIELD,
        value: value.to_string(),
        allowed: T::allowed(),
    })
}

/// Validate a multi-valued filter.
///
/// Nothing given yields `default`, or the whole vocabulary when `default` is
/// absent or empty. The result keeps the caller's order and duplicates.
pub fn validate_multi<T, S>(values: &Filter<S>, default: Option<&[T]>) -> Result<Vec<T>>
where
    T: Choice,
    S: AsRef<str>,
{
    let raw = values.values();
    if raw.is_empty() {
        let fallback = match default {
            Some(d) if !d.is_empty() => d,
            _ => T::ALL,
        };
        return Ok(fallback.to_vec());
    }
    raw.iter().map(|v| parse(v.as_ref())).collect()
}

/// Validate a filter that accepts at most one value.
pub fn validate_single<T, S>(value: &Filter<S>, default: Option<T>) -> Result<Option<T>>
where
    T: Choice,
    S: AsRef<str>,
{
    match value.values() {
        [] => Ok(default),
        [one] => parse(one.as_ref()).map(Some),
        many => Err(Error::TooManyValues {
            field: T::FIELD,
            values: many.iter().map(|v| v.as_ref()).collect::<Vec<_>>().join(", "),
            allowed: T::allowed(),
        }),
    }
}

/// Filters accepted by [`Database::objects`](super::Database::objects).
///
/// Every field defaults to `Unset`. An unset protocol means `all`; an unset
/// model id list disables the model filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectQuery {
    pub groups: Filter<String>,
    pub protocol: Filter<String>,
    pub purposes: Filter<String>,
    pub model_ids: Filter<String>,
    pub sessions: Filter<String>,
    pub expressions: Filter<String>,
    pub illuminations: Filter<String>,
    pub occlusions: Filter<String>,
    pub genders: Filter<String>,
}

impl ObjectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(mut self, groups: impl Into<Filter<String>>) -> Self {
        self.groups = groups.into();
        self
    }

    pub fn protocol(mut self, protocol: impl Into<Filter<String>>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn purposes(mut self, purposes: impl Into<Filter<String>>) -> Self {
        self.purposes = purposes.into();
        self
    }

    pub fn model_ids(mut self, model_ids: impl Into<Filter<String>>) -> Self {
        self.model_ids = model_ids.into();
        self
    }

    pub fn sessions(mut self, sessions: impl Into<Filter<String>>) -> Self {
        self.sessions = sessions.into();
        self
    }

    pub fn expressions(mut self, expressions: impl Into<Filter<String>>) -> Self {
        self.expressions = expressions.into();
        self
    }

    pub fn illuminations(mut self, illuminations: impl Into<Filter<String>>) -> Self {
        self.illuminations = illuminations.into();
        self
    }

    pub fn occlusions(mut self, occlusions: impl Into<Filter<String>>) -> Self {
        self.occlusions = occlusions.into();
        self
    }

    pub fn genders(mut self, genders: impl Into<Filter<String>>) -> Self {
        self.genders = genders.into();
        self
    }

    /// Check every filter against its vocabulary.
    pub fn validate(&self) -> Result<ValidatedQuery> {
        let groups: Vec<Group> = validate_multi(&self.groups, None)?;
        let protocol: Option<ProtocolName> =
            validate_single(&self.protocol, Some(ProtocolName::default()))?;
        let purposes: Vec<Purpose> = validate_multi(&self.purposes, None)?;
        let sessions: Vec<Session> = validate_multi(&self.sessions, None)?;
        let expressions: Vec<Expression> = validate_multi(&self.expressions, None)?;
        let illuminations: Vec<Illumination> = validate_multi(&self.illuminations, None)?;
        let occlusions: Vec<Occlusion> = validate_multi(&self.occlusions, None)?;
        let genders: Vec<Gender> = validate_multi(&self.genders, None)?;

        let model_ids = match &self.model_ids {
            Filter::Unset => None,
            ids => Some(ids.values().to_vec()),
        };

        Ok(ValidatedQuery {
            groups,
            protocol: protocol.unwrap_or_default(),
            purposes,
            model_ids,
            sessions,
            expressions,
            illuminations,
            occlusions,
            genders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_yields_whole_vocabulary() {
        let groups: Vec<Group> = validate_multi(&Filter::<String>::Unset, None).unwrap();
        assert_eq!(groups, Group::ALL.to_vec());
    }

    #[test]
    fn test_unset_yields_default_when_given() {
        let genders: Vec<Gender> =
            validate_multi(&Filter::<&str>::Unset, Some(&[Gender::Female][..])).unwrap();
        assert_eq!(genders, vec![Gender::Female]);

        let empty: &[Gender] = &[];
        let genders: Vec<Gender> = validate_multi(&Filter::<&str>::Unset, Some(empty)).unwrap();
        assert_eq!(genders, Gender::ALL.to_vec());
    }

    #[test]
    fn test_empty_list_behaves_like_unset() {
        let sessions: Vec<Session> = validate_multi(&Filter::<String>::Many(vec![]), None).unwrap();
        assert_eq!(sessions, Session::ALL.to_vec());
    }

    #[test]
    fn test_scalar_is_one_element_list() {
        let groups: Vec<Group> = validate_multi(&Filter::from("dev"), None).unwrap();
        assert_eq!(groups, vec![Group::Dev]);
    }

    #[test]
    fn test_list_keeps_order_and_duplicates() {
        let filter = Filter::Many(vec!["eval", "dev", "eval"]);
        let groups: Vec<Group> = validate_multi(&filter, None).unwrap();
        assert_eq!(groups, vec![Group::Eval, Group::Dev, Group::Eval]);
    }

    #[test]
    fn test_typed_values_validate_too() {
        let filter = Filter::Many(vec![Group::World, Group::Eval]);
        let groups: Vec<Group> = validate_multi(&filter, None).unwrap();
        assert_eq!(groups, vec![Group::World, Group::Eval]);
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = validate_multi::<Group, _>(&Filter::Many(vec!["dev", "train"]), None).unwrap_err();
        match err {
            Error::InvalidArgument { field, value, allowed } => {
                assert_eq!(field, "group");
                assert_eq!(value, "train");
                assert_eq!(allowed, "world, dev, eval");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_single_accepts_one_value() {
        let protocol: Option<ProtocolName> =
            validate_single(&Filter::from("expression"), None).unwrap();
        assert_eq!(protocol, Some(ProtocolName::Expression));

        let protocol: Option<ProtocolName> =
            validate_single(&Filter::Many(vec!["occlusion"]), None).unwrap();
        assert_eq!(protocol, Some(ProtocolName::Occlusion));
    }

    #[test]
    fn test_single_falls_back_to_default() {
        let protocol: Option<ProtocolName> =
            validate_single(&Filter::<String>::Unset, Some(ProtocolName::All)).unwrap();
        assert_eq!(protocol, Some(ProtocolName::All));

        let protocol: Option<ProtocolName> = validate_single(&Filter::<String>::Unset, None).unwrap();
        assert_eq!(protocol, None);
    }

    #[test]
    fn test_single_rejects_several_values() {
        let err = validate_single::<ProtocolName, _>(&Filter::Many(vec!["all", "expression"]), None)
            .unwrap_err();
        assert!(matches!(err, Error::TooManyValues { field: "protocol", .. }));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_single_rejects_unknown_value() {
        let err = validate_single::<ProtocolName, _>(&Filter::from("lighting"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "protocol", .. }));
    }

    #[test]
    fn test_object_query_defaults() {
        let validated = ObjectQuery::new().validate().unwrap();
        assert_eq!(validated.groups, Group::ALL.to_vec());
        assert_eq!(validated.protocol, ProtocolName::All);
        assert_eq!(validated.purposes, Purpose::ALL.to_vec());
        assert_eq!(validated.model_ids, None);
        assert_eq!(validated.occlusions, Occlusion::ALL.to_vec());
    }

    #[test]
    fn test_object_query_scalar_model_id_becomes_list() {
        let validated = ObjectQuery::new().model_ids("m-001").validate().unwrap();
        assert_eq!(validated.model_ids, Some(vec!["m-001".to_string()]));

        let validated = ObjectQuery::new()
            .model_ids(Vec::<String>::new())
            .validate()
            .unwrap();
        assert_eq!(validated.model_ids, Some(vec![]));
    }

    #[test]
    fn test_object_query_rejects_each_field() {
        let bad = [
            ObjectQuery::new().groups("train"),
            ObjectQuery::new().protocol("P1"),
            ObjectQuery::new().purposes("train"),
            ObjectQuery::new().sessions("third"),
            ObjectQuery::new().expressions("frown"),
            ObjectQuery::new().illuminations("back"),
            ObjectQuery::new().occlusions("hat"),
            ObjectQuery::new().genders("x"),
        ];
        for query in bad {
            let err = query.validate().unwrap_err();
            assert!(err.is_invalid_argument(), "{err}");
        }
    }
}
