//! Per-kind resource table: routes, required fields, immutable fields, relations.

use crate::models::Kind;

/// A foreign key column on one kind pointing at another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForeignKey {
    pub kind: Kind,
    pub field: &'static str,
}

#[derive(Clone, Debug)]
pub struct KindSpec {
    pub kind: Kind,
    /// Collection name: route segment and `/stats` key.
    pub path_segment: &'static str,
    /// Checked in order on create; the first absent one is reported.
    pub required: &'static [&'static str],
    /// Keys skipped on update.
    pub immutable: &'static [&'static str],
    /// Owning kind for nested list/create; the id is injected into `field`.
    pub parent: Option<ForeignKey>,
    /// Body fields that must name an existing entity on create.
    pub references: &'static [ForeignKey],
    /// Child kinds deleted with this entity, matched on the child's `field`.
    pub cascade: &'static [ForeignKey],
}

impl KindSpec {
    pub fn is_immutable(&self, key: &str) -> bool {
        self.immutable.contains(&key)
    }
}

const BASE_IMMUTABLE: &[&str] = &["id", "created_at", "updated_at"];

/// The six resources of the API.
pub fn default_kinds() -> Vec<KindSpec> {
    vec![
        KindSpec {
            kind: Kind::State,
            path_segment: "states",
            required: &["name"],
            immutable: BASE_IMMUTABLE,
            parent: None,
            references: &[],
            cascade: &[ForeignKey {
                kind: Kind::City,
                field: "state_id",
            }],
        },
        KindSpec {
            kind: Kind::City,
            path_segment: "cities",
            required: &["name"],
            immutable: &["id", "created_at", "updated_at", "state_id"],
            parent: Some(ForeignKey {
                kind: Kind::State,
                field: "state_id",
            }),
            references: &[],
            cascade: &[],
        },
        KindSpec {
            kind: Kind::Amenity,
            path_segment: "amenities",
            required: &["name"],
            immutable: BASE_IMMUTABLE,
            parent: None,
            references: &[],
            cascade: &[],
        },
        KindSpec {
            kind: Kind::User,
            path_segment: "users",
            required: &["email", "password"],
            immutable: &["id", "created_at", "updated_at", "email", "password"],
            parent: None,
            references: &[],
            cascade: &[],
        },
        KindSpec {
            kind: Kind::Place,
            path_segment: "places",
            required: &["user_id", "name"],
            immutable: &["id", "created_at", "updated_at", "user_id", "city_id"],
            parent: Some(ForeignKey {
                kind: Kind::City,
                field: "city_id",
            }),
            references: &[ForeignKey {
                kind: Kind::User,
                field: "user_id",
            }],
            cascade: &[],
        },
        KindSpec {
            kind: Kind::Review,
            path_segment: "reviews",
            required: &["user_id", "text"],
            immutable: &["id", "created_at", "updated_at", "user_id", "place_id"],
            parent: Some(ForeignKey {
                kind: Kind::Place,
                field: "place_id",
            }),
            references: &[ForeignKey {
                kind: Kind::User,
                field: "user_id",
            }],
            cascade: &[],
        },
    ]
}
