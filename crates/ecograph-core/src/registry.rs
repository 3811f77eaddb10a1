//! Ontology schema registry.
//!
//! The single source of truth mapping entity types to graph classes and
//! field names to predicates. Both the form/write path and the table/read
//! path consume these descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EcoGraphError, Result};
use crate::types::{DisplayMetadata, EntityTypeDescriptor, FieldDescriptor};

/// Every entity type the catalog supports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Destinations,
    Hebergements,
    Activites,
    Certifications,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        Self::Destinations,
        Self::Hebergements,
        Self::Activites,
        Self::Certifications,
    ];

    /// Registry key for this kind.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// The static descriptor for this kind.
    pub fn descriptor(self) -> &'static EntityTypeDescriptor {
        match self {
            Self::Destinations => &DESTINATIONS,
            Self::Hebergements => &HEBERGEMENTS,
            Self::Activites => &ACTIVITES,
            Self::Certifications => &CERTIFICATIONS,
        }
    }
}

impl FromStr for EntityKind {
    type Err = EcoGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| EcoGraphError::UnknownEntityType(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Read-only view over the registered descriptors.
///
/// Construction is free; there is no runtime registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry;

impl Registry {
    pub fn builtin() -> Self {
        Self
    }

    /// Resolve an entity type key to its descriptor.
    pub fn get(&self, key: &str) -> Result<&'static EntityTypeDescriptor> {
        key.parse::<EntityKind>().map(EntityKind::descriptor)
    }

    /// All descriptors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static EntityTypeDescriptor> {
        EntityKind::ALL.into_iter().map(EntityKind::descriptor)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|d| d.key)
    }
}

// ── Descriptor table ──────────────────────────────────────────────

const LABEL: &str = "rdfs:label";
const COMMENT: &str = "rdfs:comment";

const fn field(
    name: &'static str,
    predicate_uri: Option<&'static str>,
    label: &'static str,
    required: bool,
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        predicate_uri,
        label,
        required,
    }
}

static DESTINATIONS: EntityTypeDescriptor = EntityTypeDescriptor {
    key: "destinations",
    class_uri: "eco:Destination",
    fields: &[
        field("nom", Some(LABEL), "Nom de la destination", true),
        field("description", Some(COMMENT), "Description", true),
        field("region", Some("eco:localiseDans"), "Région", false),
        field("pays", Some("eco:pays"), "Pays", false),
        field(
            "scoreDurabilite",
            Some("eco:scoreDurabilite"),
            "Score de durabilité",
            false,
        ),
    ],
    fallback_predicate: LABEL,
    display_fields: &["nom", "description", "region"],
    display: DisplayMetadata {
        title: "Gestion des Destinations",
        single_name: "une Destination",
        description: "Explorez et gérez les destinations éco-responsables",
    },
};

static HEBERGEMENTS: EntityTypeDescriptor = EntityTypeDescriptor {
    key: "hebergements",
    class_uri: "eco:Hebergement",
    fields: &[
        field("nom", Some(LABEL), "Nom de l'hébergement", true),
        field("description", Some(COMMENT), "Description", true),
        field("type", Some("eco:typeDestination"), "Type", false),
        field("prix", Some("eco:prixNuit"), "Prix par nuit (€)", false),
        field("capacite", Some("eco:capacite"), "Capacité (personnes)", false),
    ],
    fallback_predicate: LABEL,
    display_fields: &["nom", "description", "prix"],
    display: DisplayMetadata {
        title: "Gestion des Hébergements",
        single_name: "un Hébergement",
        description: "Découvrez et gérez les hébergements écologiques",
    },
};

static ACTIVITES: EntityTypeDescriptor = EntityTypeDescriptor {
    key: "activites",
    class_uri: "eco:ActiviteTouristique",
    fields: &[
        field("nom", Some(LABEL), "Nom de l'activité", true),
        field("description", Some(COMMENT), "Description", true),
        field("duree", Some("eco:duree"), "Durée", false),
        field("prix", Some("eco:cout"), "Prix (€)", false),
    ],
    fallback_predicate: LABEL,
    display_fields: &["nom", "description", "duree"],
    display: DisplayMetadata {
        title: "Gestion des Activités",
        single_name: "une Activité",
        description: "Explorez et gérez les activités touristiques durables",
    },
};

static CERTIFICATIONS: EntityTypeDescriptor = EntityTypeDescriptor {
    key: "certifications",
    class_uri: "eco:CertificatEco",
    fields: &[
        field("nom", Some(LABEL), "Nom de la certification", true),
        field("description", Some(COMMENT), "Description", true),
        field(
            "organisme",
            Some("eco:organismeEmetteur"),
            "Organisme certificateur",
            false,
        ),
        // No dedicated property in the ontology yet.
        field("criteres", None, "Critères", false),
    ],
    fallback_predicate: LABEL,
    display_fields: &["nom", "description", "organisme"],
    display: DisplayMetadata {
        title: "Gestion des Certifications",
        single_name: "une Certification",
        description: "Gérez les certifications et labels écologiques",
    },
};
