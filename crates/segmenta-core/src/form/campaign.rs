use super::required;
use crate::error::{CoreError, FieldErrors};
use crate::model::{Campaign, CampaignPatch, NewCampaign};

/// Campaign create / edit input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    pub url: String,
    pub active: bool,
}

impl Default for CampaignForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            url: String::new(),
            active: true,
        }
    }
}

impl CampaignForm {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            name: campaign.name.clone().unwrap_or_default(),
            description: campaign.description.clone().unwrap_or_default(),
            url: campaign.url.clone().unwrap_or_default(),
            active: campaign.is_active(),
        }
    }

    /// New campaign. A blank `url` becomes the slug of the name.
    pub fn validate(&self) -> Result<NewCampaign, CoreError> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        errors.into_result(())?;
        let url = match self.url.trim() {
            "" => slugify(&name),
            url => url.to_owned(),
        };
        Ok(NewCampaign {
            description: self.description.trim().to_owned(),
            url,
            active: self.active,
            name,
        })
    }

    /// Edit of an existing campaign. The url is sent as typed (trimmed).
    pub fn validate_patch(&self) -> Result<CampaignPatch, CoreError> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        errors.into_result(CampaignPatch {
            name: Some(name),
            description: Some(self.description.trim().to_owned()),
            url: Some(self.url.trim().to_owned()),
            active: Some(self.active),
        })
    }
}

/// Lower-cased name with each whitespace run replaced by `-`.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::REQUIRED;

    #[test]
    fn slug_collapses_whitespace_runs() {
        assert_eq!(slugify("  Gran   Venta\tDe Verano "), "gran-venta-de-verano");
        assert_eq!(slugify("Año Nuevo"), "año-nuevo");
    }

    #[test]
    fn blank_url_defaults_to_slug() {
        let form = CampaignForm {
            name: " Buen Fin ".into(),
            description: "  descuentos ".into(),
            ..CampaignForm::default()
        };
        let campaign = form.validate().unwrap();
        assert_eq!(campaign.name, "Buen Fin");
        assert_eq!(campaign.url, "buen-fin");
        assert_eq!(campaign.description, "descuentos");
        assert!(campaign.active);
    }

    #[test]
    fn explicit_url_wins() {
        let form = CampaignForm {
            name: "Buen Fin".into(),
            url: " bf-2025 ".into(),
            ..CampaignForm::default()
        };
        assert_eq!(form.validate().unwrap().url, "bf-2025");
    }

    #[test]
    fn name_is_required() {
        let err = CampaignForm::default().validate().unwrap_err();
        let CoreError::ValidationFailed { errors } = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get("name"), Some(REQUIRED));
    }

    #[test]
    fn edit_keeps_blank_url() {
        let form = CampaignForm {
            name: "X".into(),
            active: false,
            ..CampaignForm::default()
        };
        let patch = form.validate_patch().unwrap();
        assert_eq!(patch.url.as_deref(), Some(""));
        assert_eq!(patch.active, Some(false));
    }
}
