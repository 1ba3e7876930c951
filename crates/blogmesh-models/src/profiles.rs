//! User profiles. At most one per user.

use blogmesh_core::Owned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, PartialEq, Eq)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Twitter must be a valid URL"))]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Facebook must be a valid URL"))]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "LinkedIn must be a valid URL"))]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "GitHub must be a valid URL"))]
    pub github: Option<String>,
}

impl SocialLinks {
    /// Overlays the links present in `other`.
    fn merge(&mut self, other: SocialLinks) {
        if other.twitter.is_some() {
            self.twitter = other.twitter;
        }
        if other.facebook.is_some() {
            self.facebook = other.facebook;
        }
        if other.linkedin.is_some() {
            self.linkedin = other.linkedin;
        }
        if other.github.is_some() {
            self.github = other.github;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    #[sqlx(json)]
    pub social: SocialLinks,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Empty profile for `user_id`.
    pub fn empty(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            location: None,
            website: None,
            social: SocialLinks::default(),
            interests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `dto`; absent fields keep their value.
    pub fn apply(&mut self, dto: ProfileDto) {
        if dto.bio.is_some() {
            self.bio = dto.bio;
        }
        if dto.location.is_some() {
            self.location = dto.location;
        }
        if dto.website.is_some() {
            self.website = dto.website;
        }
        if let Some(social) = dto.social {
            self.social.merge(social);
        }
        if let Some(interests) = dto.interests {
            self.interests = interests
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Profile {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Body for profile create-or-update and update.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProfileDto {
    #[validate(length(max = 500, message = "Bio cannot exceed 500 characters"))]
    pub bio: Option<String>,
    pub location: Option<String>,
    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
    #[validate(nested)]
    pub social: Option<SocialLinks>,
    pub interests: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_dto_validation() {
        let valid = ProfileDto {
            bio: Some("Rustacean".to_string()),
            website: Some("https://example.com".to_string()),
            social: Some(SocialLinks {
                github: Some("https://github.com/alice".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let long_bio = ProfileDto {
            bio: Some("x".repeat(501)),
            ..Default::default()
        };
        assert!(long_bio.validate().is_err());

        let bad_website = ProfileDto {
            website: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(bad_website.validate().is_err());

        let bad_social = ProfileDto {
            social: Some(SocialLinks {
                twitter: Some("@alice".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(bad_social.validate().is_err());
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let user_id = Uuid::new_v4();
        let mut profile = Profile::empty(user_id);
        profile.apply(ProfileDto {
            bio: Some("first".to_string()),
            location: Some("Lagos".to_string()),
            social: Some(SocialLinks {
                github: Some("https://github.com/alice".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        profile.apply(ProfileDto {
            bio: Some("second".to_string()),
            social: Some(SocialLinks {
                twitter: Some("https://twitter.com/alice".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.bio.as_deref(), Some("second"));
        assert_eq!(profile.location.as_deref(), Some("Lagos"));
        assert_eq!(
            profile.social.github.as_deref(),
            Some("https://github.com/alice")
        );
        assert_eq!(
            profile.social.twitter.as_deref(),
            Some("https://twitter.com/alice")
        );
    }
}
