//! The payload shapes for creating and updating a Fundi profile.
//!
//! The update shape is not written by hand. It is generated from the same
//! field list as the create shape, with every field made optional, so the two
//! cannot drift apart.

use crate::fundi::fields::{
    Email, FundiName, ImageUrl, LocationName, PhoneNumber, Skills, YearsOfExperience,
};

/// Links a payload with all fields required to its relaxed counterpart where
/// every field is optional.
pub trait Partial {
    /// The shape with every field optional.
    type Partial: Default;

    /// Convert a complete payload into a partial one that sets every field.
    fn into_partial(self) -> Self::Partial;
}

/// Declares a create payload and its update payload from a single field list.
///
/// Both payloads use camelCase on the wire and reject unknown fields. Fields
/// of the update payload are `Option`s that are omitted when serialized if
/// unset; an explicit `null` counts as not supplied.
macro_rules! partial_dto {
    (
        $(#[$create_meta:meta])*
        pub struct $create:ident;

        $(#[$update_meta:meta])*
        pub struct $update:ident;

        fields {
            $( $(#[$field_meta:meta])* $field:ident: $ty:ty, )+
        }
    ) => {
        $(#[$create_meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $create {
            $( $(#[$field_meta])* pub $field: $ty, )+
        }

        $(#[$update_meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $update {
            $(
                $(#[$field_meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl $update {
            /// Whether the update leaves every field untouched.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }
        }

        impl Partial for $create {
            type Partial = $update;

            fn into_partial(self) -> Self::Partial {
                $update {
                    $( $field: Some(self.$field), )+
                }
            }
        }
    };
}

partial_dto! {
    /// The payload for creating a Fundi profile. Every field is required.
    pub struct CreateFundiDto;

    /// The payload for updating a Fundi profile.
    ///
    /// Any subset of the [CreateFundiDto] fields may be given, including none.
    /// Supplied fields obey the same constraints as when creating a profile.
    pub struct UpdateFundiDto;

    fields {
        /// The display name.
        name: FundiName,
        /// The number clients call to hire the fundi.
        phone_number: PhoneNumber,
        /// The contact email address.
        email: Email,
        /// The trades offered.
        skills: Skills,
        /// Where the fundi works.
        location: LocationName,
        /// Whole years worked in the trade.
        years_of_experience: YearsOfExperience,
        /// The uploaded profile photo.
        profile_image_url: ImageUrl,
    }
}
