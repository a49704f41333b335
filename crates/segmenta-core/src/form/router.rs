use super::{number, required};
use crate::error::{CoreError, FieldErrors};
use crate::model::{NewRouter, Router, RouterPatch};

/// Editable router fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterForm {
    pub serial: String,
    pub mac: String,
    pub device_name: String,
    pub estacion: String,
    pub municipio: String,
    pub latitud: String,
    pub longitud: String,
    pub group_name: String,
}

impl RouterForm {
    /// Prefill from a cached router for a full edit.
    pub fn from_router(router: &Router) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            serial: text(&router.serial),
            mac: text(&router.mac),
            device_name: text(&router.device_name),
            estacion: text(&router.estacion),
            municipio: text(&router.municipio),
            latitud: num(router.latitud),
            longitud: num(router.longitud),
            group_name: text(&router.group_name),
        }
    }

    /// Every text field required, coordinates numeric. Values are trimmed.
    pub fn validate(&self) -> Result<NewRouter, CoreError> {
        let mut errors = FieldErrors::new();
        let serial = required(&mut errors, "serial", &self.serial);
        let mac = required(&mut errors, "mac", &self.mac);
        let device_name = required(&mut errors, "device_name", &self.device_name);
        let estacion = required(&mut errors, "estacion", &self.estacion);
        let municipio = required(&mut errors, "municipio", &self.municipio);
        let latitud = number(&mut errors, "latitud", &self.latitud);
        let longitud = number(&mut errors, "longitud", &self.longitud);
        let group_name = required(&mut errors, "group_name", &self.group_name);

        match (latitud, longitud) {
            (Some(latitud), Some(longitud)) if errors.is_empty() => Ok(NewRouter {
                serial,
                mac,
                device_name,
                estacion,
                municipio,
                latitud,
                longitud,
                group_name,
            }),
            _ => Err(CoreError::ValidationFailed { errors }),
        }
    }

    /// Validated full-record patch for an edit.
    pub fn validate_patch(&self) -> Result<RouterPatch, CoreError> {
        let r = self.validate()?;
        Ok(RouterPatch {
            serial: Some(r.serial),
            mac: Some(r.mac),
            device_name: Some(r.device_name),
            estacion: Some(r.estacion),
            municipio: Some(r.municipio),
            latitud: Some(r.latitud),
            longitud: Some(r.longitud),
            group_name: Some(r.group_name),
        })
    }
}
