//! Storage-independent query plans.
//!
//! A plan names the records to fetch, whether the protocol rules must be
//! joined in, and a flat list of equality / membership constraints that all
//! have to hold. The SQLite adapter compiles plans into SQL; nothing here
//! knows about SQL.

use super::choices::{
    Choice, Expression, Gender, Group, Illumination, Occlusion, ProtocolName, Purpose, Session,
};

/// Which kind of record a plan returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Clients,
    Files,
}

/// The role of a plan, used for logging and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Clients,
    /// Training files of the world group
    World,
    /// Enrolment files of dev/eval
    Enrol,
    /// Probe files of dev/eval
    Probe,
    /// Single file by id
    Lookup,
}

impl Stream {
    pub fn target(&self) -> Target {
        match self {
            Stream::Clients => Target::Clients,
            _ => Target::Files,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ClientId,
    ClientGroup,
    ClientGender,
    FileId,
    FilePurpose,
    FileSession,
    FileExpression,
    FileIllumination,
    FileOcclusion,
    ProtocolName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(i64),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Eq(Column, Value),
    /// Membership; an empty set matches nothing.
    In(Column, Vec<Value>),
}

impl Constraint {
    pub fn column(&self) -> Column {
        match self {
            Constraint::Eq(c, _) | Constraint::In(c, _) => *c,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub stream: Stream,
    pub join_protocol: bool,
    pub constraints: Vec<Constraint>,
}

impl QueryPlan {
    pub fn new(stream: Stream) -> Self {
        Self {
            stream,
            join_protocol: false,
            constraints: Vec::new(),
        }
    }

    /// Join the protocol rules on (expression, illumination, occlusion) and
    /// keep only the rules named `protocol`.
    pub fn in_protocol(mut self, protocol: ProtocolName) -> Self {
        self.join_protocol = true;
        self.eq(Column::ProtocolName, protocol.as_str())
    }

    pub fn eq(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Eq(column, value.into()));
        self
    }

    pub fn member<T: Choice>(mut self, column: Column, values: &[T]) -> Self {
        let values = values.iter().map(|v| Value::from(v.as_str())).collect();
        self.constraints.push(Constraint::In(column, values));
        self
    }

    pub fn member_ids(mut self, column: Column, ids: &[String]) -> Self {
        let values = ids.iter().map(|id| Value::Text(id.clone())).collect();
        self.constraints.push(Constraint::In(column, values));
        self
    }
}

/// Filters of a file query after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub groups: Vec<Group>,
    pub protocol: ProtocolName,
    pub purposes: Vec<Purpose>,
    /// `None` disables the model filter; an empty list matches no model.
    pub model_ids: Option<Vec<String>>,
    pub sessions: Vec<Session>,
    pub expressions: Vec<Expression>,
    pub illuminations: Vec<Illumination>,
    pub occlusions: Vec<Occlusion>,
    pub genders: Vec<Gender>,
}

impl ValidatedQuery {
    fn with_attributes(&self, plan: QueryPlan) -> QueryPlan {
        plan.member(Column::FileExpression, &self.expressions)
            .member(Column::FileIllumination, &self.illuminations)
            .member(Column::FileOcclusion, &self.occlusions)
            .member(Column::FileSession, &self.sessions)
            .member(Column::ClientGender, &self.genders)
    }
}

pub fn clients_plan(groups: &[Group], genders: &[Gender]) -> QueryPlan {
    QueryPlan::new(Stream::Clients)
        .member(Column::ClientGroup, groups)
        .member(Column::ClientGender, genders)
}

pub fn file_lookup_plan(file_id: i64) -> QueryPlan {
    QueryPlan::new(Stream::Lookup).eq(Column::FileId, Value::Integer(file_id))
}

/// Plans answering a file query, in output order.
///
/// World files ignore the purpose filter. Enrolment files of dev/eval ignore
/// the attribute and protocol filters. The model filter applies to world and
/// enrolment files only, since probe files are shared by every model. Probe
/// plans always come last.
pub fn objects_plans(query: &ValidatedQuery) -> Vec<QueryPlan> {
    let mut plans = Vec::new();
    let mut probe_plans = Vec::new();

    if query.groups.contains(&Group::World) {
        plans.push(query.with_attributes(
            QueryPlan::new(Stream::World)
                .eq(Column::ClientGroup, Group::World.as_str())
                .in_protocol(query.protocol),
        ));
    }

    let subgroups: Vec<Group> = [Group::Dev, Group::Eval]
        .into_iter()
        .filter(|g| query.groups.contains(g))
        .collect();

    if !subgroups.is_empty() {
        if query.purposes.contains(&Purpose::Enrol) {
            plans.push(
                QueryPlan::new(Stream::Enrol)
                    .member(Column::ClientGroup, &subgroups)
                    .member(Column::ClientGender, &query.genders)
                    .eq(Column::FilePurpose, Purpose::Enrol.as_str()),
            );
        }

        if query.purposes.contains(&Purpose::Probe) {
            probe_plans.push(query.with_attributes(
                QueryPlan::new(Stream::Probe)
                    .member(Column::ClientGroup, &subgroups)
                    .eq(Column::FilePurpose, Purpose::Probe.as_str())
                    .in_protocol(query.protocol),
            ));
        }
    }

    if let Some(ids) = &query.model_ids {
        plans = plans
            .into_iter()
            .map(|plan| plan.member_ids(Column::ClientId, ids))
            .collect();
    }

    plans.extend(probe_plans);
    plans
}
