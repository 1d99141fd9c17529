use std::fmt;

use serde::Serialize;

/// Languages the site ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Es,
    En,
    Ca,
    Fr,
    De,
    It,
}

pub const DEFAULT_LANG: Lang = Lang::Es;

impl Lang {
    /// Collapses an arbitrary client-supplied language tag to a supported
    /// language. Matching is on the lowercased 2-letter prefix; anything
    /// unsupported falls back to the default.
    pub fn normalize(raw: Option<&str>) -> Lang {
        let Some(raw) = raw else {
            return DEFAULT_LANG;
        };

        let tag = raw.trim().to_lowercase();
        match tag.split('-').next().unwrap_or_default() {
            "es" => Lang::Es,
            "en" => Lang::En,
            "ca" => Lang::Ca,
            "fr" => Lang::Fr,
            "de" => Lang::De,
            "it" => Lang::It,
            _ => DEFAULT_LANG,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
            Lang::Ca => "ca",
            Lang::Fr => "fr",
            Lang::De => "de",
            Lang::It => "it",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Translation strings the contact pipeline consumes. Every language carries
/// every key, so lookups cannot miss.
#[derive(Debug)]
pub struct Messages {
    pub form_disabled: &'static str,
    pub service_unavailable: &'static str,
}

pub fn messages(lang: Lang) -> &'static Messages {
    match lang {
        Lang::Es => &Messages {
            form_disabled: "El formulario de contacto no está disponible en este momento.",
            service_unavailable: "Servicio no disponible, inténtalo de nuevo más tarde.",
        },
        Lang::En => &Messages {
            form_disabled: "The contact form is currently unavailable.",
            service_unavailable: "Service unavailable, please try again later.",
        },
        Lang::Ca => &Messages {
            form_disabled: "El formulari de contacte no està disponible en aquest moment.",
            service_unavailable: "Servei no disponible, torna-ho a provar més tard.",
        },
        Lang::Fr => &Messages {
            form_disabled: "Le formulaire de contact est indisponible pour le moment.",
            service_unavailable: "Service indisponible, veuillez réessayer plus tard.",
        },
        Lang::De => &Messages {
            form_disabled: "Das Kontaktformular ist derzeit nicht verfügbar.",
            service_unavailable: "Dienst nicht verfügbar, bitte versuchen Sie es später erneut.",
        },
        Lang::It => &Messages {
            form_disabled: "Il modulo di contatto non è disponibile al momento.",
            service_unavailable: "Servizio non disponibile, riprova più tardi.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_matches_two_letter_prefix() {
        assert_eq!(Lang::normalize(Some("en-US")), Lang::En);
        assert_eq!(Lang::normalize(Some("CA")), Lang::Ca);
        assert_eq!(Lang::normalize(Some("fr-CH")), Lang::Fr);
    }

    #[test]
    fn normalize_falls_back_to_default() {
        assert_eq!(Lang::normalize(None), Lang::Es);
        assert_eq!(Lang::normalize(Some("")), Lang::Es);
        assert_eq!(Lang::normalize(Some("pt-BR")), Lang::Es);
        assert_eq!(Lang::normalize(Some("zz")), Lang::Es);
    }

    #[test]
    fn every_language_has_messages() {
        for lang in [Lang::Es, Lang::En, Lang::Ca, Lang::Fr, Lang::De, Lang::It] {
            let msgs = messages(lang);
            assert!(!msgs.form_disabled.is_empty());
            assert!(!msgs.service_unavailable.is_empty());
        }
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Lang::De).unwrap(), "\"de\"");
    }
}
