use shared::{AppSettings, Language, Theme, UpdateSettingsRequest};

use crate::domain::commands::settings::UpdateSettingsCommand;
use crate::domain::models::settings::{DomainLanguage, DomainSettings, DomainTheme};

pub struct SettingsMapper;

impl SettingsMapper {
    pub fn to_dto(domain: DomainSettings) -> AppSettings {
        AppSettings {
            language: match domain.language {
                DomainLanguage::Indonesian => Language::Indonesian,
                DomainLanguage::English => Language::English,
            },
            theme: match domain.theme {
                DomainTheme::Light => Theme::Light,
                DomainTheme::Dark => Theme::Dark,
            },
        }
    }

    pub fn to_command(dto: UpdateSettingsRequest) -> UpdateSettingsCommand {
        UpdateSettingsCommand {
            language: dto.language.map(|language| match language {
                Language::Indonesian => DomainLanguage::Indonesian,
                Language::English => DomainLanguage::English,
            }),
            theme: dto.theme.map(|theme| match theme {
                Theme::Light => DomainTheme::Light,
                Theme::Dark => DomainTheme::Dark,
            }),
        }
    }
}
