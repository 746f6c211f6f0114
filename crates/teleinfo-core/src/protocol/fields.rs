//! Known historic fields and their numeric projection.
//!
//! Historic decoding is closed-world: a field name missing from
//! [`HISTORIC_FIELDS`] is a decode error. Each descriptor says how the raw
//! value is projected to an [`Observation`]; a value that does not parse as a
//! number projects to `0.0` and never fails the decode.

use log::trace;

use crate::outcome::{Label, Observation};

pub const METRIC_HEURES_CREUSES: &str = "teleinfo_heures_creuses_total";
pub const METRIC_HEURES_PLEINES: &str = "teleinfo_heures_pleines_total";
pub const METRIC_BASE: &str = "teleinfo_base_total";
pub const METRIC_PROGRAMMATION_HPHC: &str = "teleinfo_programmation_heures_pleines_heures_creuses";
pub const METRIC_INTENSITE_INSTANTANEE: &str = "teleinfo_instensite_instantanee";
pub const METRIC_INTENSITE_MAXIMALE: &str = "teleinfo_instensite_maximale";
pub const METRIC_INTENSITE_SOUSCRITE: &str = "teleinfo_instensite_souscrite";
pub const METRIC_MOT_ETAT: &str = "teleinfo_mode_etat_compteur";
pub const METRIC_OPTION_TARIFAIRE: &str = "teleinfo_option_tarifaire_choisie";
pub const METRIC_PUISSANCE_APPARENTE: &str = "teleinfo_puissance_apparente_triphase";
pub const METRIC_PUISSANCE_MAXIMALE: &str = "teleinfo_puissance_maximale_triphase";
pub const METRIC_PERIODE_TARIFAIRE: &str = "teleinfo_periode_tarifaire_en_cours";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Recognised but not projected.
    Ignored,
    /// Value parsed as a number.
    Gauge { metric: &'static str },
    /// Value parsed as a number, labelled with the last character of the field name.
    PhaseGauge { metric: &'static str },
    /// Constant `1.0`, labelled with the raw value.
    Flag {
        metric: &'static str,
        label: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub projection: Projection,
}

const fn field(name: &'static str, projection: Projection) -> FieldDescriptor {
    FieldDescriptor { name, projection }
}

pub const HISTORIC_FIELDS: &[FieldDescriptor] = &[
    // Meter address and potential presence carry no useful metric.
    field("ADCO", Projection::Ignored),
    field("PPOT", Projection::Ignored),
    field("HCHC", Projection::Gauge { metric: METRIC_HEURES_CREUSES }),
    field("HCHP", Projection::Gauge { metric: METRIC_HEURES_PLEINES }),
    field("BASE", Projection::Gauge { metric: METRIC_BASE }),
    field(
        "HHPHC",
        Projection::Flag {
            metric: METRIC_PROGRAMMATION_HPHC,
            label: "programme",
        },
    ),
    field("IINST", Projection::PhaseGauge { metric: METRIC_INTENSITE_INSTANTANEE }),
    field("IINST1", Projection::PhaseGauge { metric: METRIC_INTENSITE_INSTANTANEE }),
    field("IINST2", Projection::PhaseGauge { metric: METRIC_INTENSITE_INSTANTANEE }),
    field("IINST3", Projection::PhaseGauge { metric: METRIC_INTENSITE_INSTANTANEE }),
    field("IMAX1", Projection::PhaseGauge { metric: METRIC_INTENSITE_MAXIMALE }),
    field("IMAX2", Projection::PhaseGauge { metric: METRIC_INTENSITE_MAXIMALE }),
    field("IMAX3", Projection::PhaseGauge { metric: METRIC_INTENSITE_MAXIMALE }),
    field("ISOUSC", Projection::Gauge { metric: METRIC_INTENSITE_SOUSCRITE }),
    field("MOTDETAT", Projection::Gauge { metric: METRIC_MOT_ETAT }),
    field(
        "OPTARIF",
        Projection::Flag {
            metric: METRIC_OPTION_TARIFAIRE,
            label: "tarif",
        },
    ),
    field("PAPP", Projection::Gauge { metric: METRIC_PUISSANCE_APPARENTE }),
    field("PMAX", Projection::Gauge { metric: METRIC_PUISSANCE_MAXIMALE }),
    field(
        "PTEC",
        Projection::Flag {
            metric: METRIC_PERIODE_TARIFAIRE,
            label: "tarif",
        },
    ),
];

/// Looks up a historic field by its raw name.
///
/// # Examples
/// ```
/// use teleinfo_core::protocol::fields::historic_field;
///
/// assert!(historic_field(b"PAPP").is_some());
/// assert!(historic_field(b"FOO").is_none());
/// ```
pub fn historic_field(name: &[u8]) -> Option<&'static FieldDescriptor> {
    HISTORIC_FIELDS
        .iter()
        .find(|descriptor| descriptor.name.as_bytes() == name)
}

impl FieldDescriptor {
    pub fn project(&self, value: &str) -> Option<Observation> {
        match self.projection {
            Projection::Ignored => None,
            Projection::Gauge { metric } => Some(Observation {
                metric: metric.to_string(),
                labels: Vec::new(),
                value: parse_or_zero(self.name, value),
            }),
            Projection::PhaseGauge { metric } => {
                let phase = self
                    .name
                    .chars()
                    .last()
                    .map(String::from)
                    .unwrap_or_default();
                Some(Observation {
                    metric: metric.to_string(),
                    labels: vec![Label {
                        name: "phase".to_string(),
                        value: phase,
                    }],
                    value: parse_or_zero(self.name, value),
                })
            }
            Projection::Flag { metric, label } => Some(Observation {
                metric: metric.to_string(),
                labels: vec![Label {
                    name: label.to_string(),
                    value: value.to_string(),
                }],
                value: 1.0,
            }),
        }
    }
}

fn parse_or_zero(name: &str, value: &str) -> f64 {
    value.parse::<f64>().unwrap_or_else(|_| {
        trace!("field {name}: non-numeric value '{value}' projected as 0");
        0.0
    })
}
