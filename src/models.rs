use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::form::{FieldSpec, FieldValues};

/// Server-assigned identifier. Never mutated client-side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

/// The two backend-managed entity kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Museum,
    Curator,
}

const MUSEUM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", "El nombre es obligatorio"),
    FieldSpec::required("ubicacion", "Ubicación", "La ubicación es obligatoria"),
];

const CURATOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", "El nombre es obligatorio"),
    FieldSpec::required("especialidad", "Especialidad", "La especialidad es obligatoria"),
    FieldSpec::required(
        "fechaNacimiento",
        "Fecha de nacimiento (AAAA-MM-DD)",
        "La fecha de nacimiento es obligatoria",
    )
    .hidden_in_table(),
];

/// Single-field schema used to assign or unassign a curator on a museum
pub const CURATOR_LINK_FIELDS: &[FieldSpec] = &[FieldSpec::required(
    "curadorId",
    "ID del curador",
    "El ID del curador es obligatorio",
)];

impl ResourceKind {
    /// Field schema driving forms, tables and detail views
    pub fn schema(self) -> &'static [FieldSpec] {
        match self {
            ResourceKind::Museum => MUSEUM_FIELDS,
            ResourceKind::Curator => CURATOR_FIELDS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Museum => "museum",
            ResourceKind::Curator => "curator",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Museum => "Museo",
            ResourceKind::Curator => "Curador",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Museum => "Museos",
            ResourceKind::Curator => "Curadores",
        }
    }

    /// Column headers of the list table: the id followed by every table field
    pub fn table_columns(self) -> Vec<&'static str> {
        std::iter::once("ID")
            .chain(self.schema().iter().filter(|f| f.in_table).map(|f| f.label))
            .collect()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform row held by views, forms and snapshots.
///
/// `values` is aligned with the owning kind's [`ResourceKind::schema`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub values: Vec<String>,
}

impl Record {
    pub fn new(id: RecordId, values: Vec<String>) -> Self {
        Record { id, values }
    }

    /// Look up a field value by its schema name
    pub fn value(&self, kind: ResourceKind, name: &str) -> Option<&str> {
        kind.schema()
            .iter()
            .position(|f| f.name == name)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Cells for the list table, matching [`ResourceKind::table_columns`]
    pub fn table_cells(&self, kind: ResourceKind) -> Vec<String> {
        let fields = kind
            .schema()
            .iter()
            .zip(self.values.iter())
            .filter(|(spec, _)| spec.in_table)
            .map(|(_, value)| value.clone());
        std::iter::once(self.id.to_string()).chain(fields).collect()
    }
}

/// An entity owned by one of the backend services
pub trait Resource: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> Option<RecordId>;

    /// Field values in schema order
    fn field_values(&self) -> Vec<String>;

    /// Build a draft (no id) from submitted form values
    fn from_values(values: &FieldValues) -> Self;

    /// Convert to a uniform row; `None` when the server sent no id
    fn to_record(&self) -> Option<Record> {
        self.id().map(|id| Record::new(id, self.field_values()))
    }
}

/// Museum entity as served by the museums service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Museum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub nombre: String,
    pub ubicacion: String,
}

impl Museum {
    pub fn new(nombre: impl Into<String>, ubicacion: impl Into<String>) -> Self {
        Museum {
            id: None,
            nombre: nombre.into(),
            ubicacion: ubicacion.into(),
        }
    }
}

impl Resource for Museum {
    const KIND: ResourceKind = ResourceKind::Museum;

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn field_values(&self) -> Vec<String> {
        vec![self.nombre.clone(), self.ubicacion.clone()]
    }

    fn from_values(values: &FieldValues) -> Self {
        Museum::new(values.get_or_empty("nombre"), values.get_or_empty("ubicacion"))
    }
}

/// Curator entity as served by the curators service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub nombre: String,
    pub especialidad: String,
    #[serde(rename = "fechaNacimiento", default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
}

impl Curator {
    pub fn new(nombre: impl Into<String>, especialidad: impl Into<String>) -> Self {
        Curator {
            id: None,
            nombre: nombre.into(),
            especialidad: especialidad.into(),
            fecha_nacimiento: None,
        }
    }

    pub fn born(mut self, fecha: impl Into<String>) -> Self {
        self.fecha_nacimiento = Some(fecha.into());
        self
    }
}

impl Resource for Curator {
    const KIND: ResourceKind = ResourceKind::Curator;

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn field_values(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.especialidad.clone(),
            self.fecha_nacimiento.clone().unwrap_or_default(),
        ]
    }

    fn from_values(values: &FieldValues) -> Self {
        let curator = Curator::new(
            values.get_or_empty("nombre"),
            values.get_or_empty("especialidad"),
        );
        match values.get("fechaNacimiento") {
            Some(fecha) if !fecha.trim().is_empty() => curator.born(fecha.trim()),
            _ => curator,
        }
    }
}
