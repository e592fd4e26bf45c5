//! The user's emotional profile and its selection catalogs.
//!
//! Every list field is a bounded multi-select over a fixed catalog;
//! `communication_style` is a single choice that is replaced on toggle.

use serde::{Deserialize, Serialize};

pub const PERSONALITY_TRAITS: &[&str] = &[
    "Introvertido",
    "Extrovertido",
    "Analítico",
    "Criativo",
    "Empático",
    "Prático",
    "Sonhador",
    "Aventureiro",
    "Reservado",
    "Otimista",
    "Calmo",
    "Energético",
];

pub const INTERESTS: &[&str] = &[
    "Literatura",
    "Cinema",
    "Música",
    "Arte",
    "Tecnologia",
    "Ciência",
    "Filosofia",
    "História",
    "Viagens",
    "Esportes",
    "Culinária",
    "Jogos",
    "Meditação",
    "Psicologia",
    "Espiritualidade",
    "Política",
    "Natureza",
    "Moda",
];

pub const COMPANIONSHIP_GOALS: &[&str] = &[
    "Conversas profundas",
    "Apoio emocional",
    "Companheirismo diário",
    "Crescimento pessoal",
    "Momentos de descontração",
    "Conselhos e orientação",
    "Inspiração criativa",
    "Desenvolvimento intelectual",
    "Conexão romântica",
    "Amizade casual",
];

pub const COMMUNICATION_STYLES: &[&str] = &[
    "Direto e objetivo",
    "Detalhado e explicativo",
    "Gentil e empático",
    "Reflexivo e profundo",
    "Bem-humorado e leve",
    "Prático e conciso",
];

pub const EMOTIONAL_NEEDS: &[&str] = &[
    "Validação",
    "Escuta ativa",
    "Espaço pessoal",
    "Estabilidade",
    "Estímulo intelectual",
    "Apoio em momentos difíceis",
    "Celebração de conquistas",
    "Presença consistente",
    "Compreensão sem julgamentos",
];

pub const IDEAL_PARTNER_TRAITS: &[&str] = &[
    "Atencioso",
    "Inteligente",
    "Divertido",
    "Calmo",
    "Empático",
    "Aventureiro",
    "Organizado",
    "Criativo",
    "Romântico",
    "Pragmático",
    "Motivador",
    "Equilibrado",
    "Acolhedor",
];

pub const DEAL_BREAKERS: &[&str] = &[
    "Negatividade constante",
    "Falta de empatia",
    "Comunicação superficial",
    "Desinteresse pelos meus problemas",
    "Julgamentos frequentes",
    "Incompatibilidade de valores",
    "Falta de respeito aos limites",
];

/// The user's self-declared preferences. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmotionalProfile {
    pub personality_traits: Vec<String>,
    pub interests: Vec<String>,
    pub companionship_goals: Vec<String>,
    /// Empty string means "not chosen".
    pub communication_style: String,
    pub emotional_needs: Vec<String>,
    pub ideal_partner_traits: Vec<String>,
    pub deal_breakers: Vec<String>,
}

/// One selectable field of an [`EmotionalProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    PersonalityTraits,
    Interests,
    CompanionshipGoals,
    CommunicationStyle,
    EmotionalNeeds,
    IdealPartnerTraits,
    DealBreakers,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        Self::PersonalityTraits,
        Self::Interests,
        Self::CompanionshipGoals,
        Self::CommunicationStyle,
        Self::EmotionalNeeds,
        Self::IdealPartnerTraits,
        Self::DealBreakers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalityTraits => "personality-traits",
            Self::Interests => "interests",
            Self::CompanionshipGoals => "companionship-goals",
            Self::CommunicationStyle => "communication-style",
            Self::EmotionalNeeds => "emotional-needs",
            Self::IdealPartnerTraits => "ideal-partner-traits",
            Self::DealBreakers => "deal-breakers",
        }
    }

    /// Selection ceiling for this field.
    pub fn max_selections(&self) -> usize {
        match self {
            Self::PersonalityTraits | Self::IdealPartnerTraits => 5,
            Self::Interests => 8,
            Self::CommunicationStyle => 1,
            Self::CompanionshipGoals | Self::EmotionalNeeds | Self::DealBreakers => 4,
        }
    }

    /// The fixed catalog of options offered for this field.
    pub fn catalog(&self) -> &'static [&'static str] {
        match self {
            Self::PersonalityTraits => PERSONALITY_TRAITS,
            Self::Interests => INTERESTS,
            Self::CompanionshipGoals => COMPANIONSHIP_GOALS,
            Self::CommunicationStyle => COMMUNICATION_STYLES,
            Self::EmotionalNeeds => EMOTIONAL_NEEDS,
            Self::IdealPartnerTraits => IDEAL_PARTNER_TRAITS,
            Self::DealBreakers => DEAL_BREAKERS,
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown profile field: {s}"))
    }
}

/// What a [`EmotionalProfile::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The communication style was overwritten.
    Replaced,
    /// The field is full; the profile is unchanged.
    AtCapacity,
}

impl EmotionalProfile {
    /// The selections for a list field. `None` for the single-choice style.
    pub fn selections(&self, field: ProfileField) -> Option<&[String]> {
        match field {
            ProfileField::PersonalityTraits => Some(&self.personality_traits),
            ProfileField::Interests => Some(&self.interests),
            ProfileField::CompanionshipGoals => Some(&self.companionship_goals),
            ProfileField::EmotionalNeeds => Some(&self.emotional_needs),
            ProfileField::IdealPartnerTraits => Some(&self.ideal_partner_traits),
            ProfileField::DealBreakers => Some(&self.deal_breakers),
            ProfileField::CommunicationStyle => None,
        }
    }

    fn selections_mut(&mut self, field: ProfileField) -> Option<&mut Vec<String>> {
        match field {
            ProfileField::PersonalityTraits => Some(&mut self.personality_traits),
            ProfileField::Interests => Some(&mut self.interests),
            ProfileField::CompanionshipGoals => Some(&mut self.companionship_goals),
            ProfileField::EmotionalNeeds => Some(&mut self.emotional_needs),
            ProfileField::IdealPartnerTraits => Some(&mut self.ideal_partner_traits),
            ProfileField::DealBreakers => Some(&mut self.deal_breakers),
            ProfileField::CommunicationStyle => None,
        }
    }

    /// Select or deselect `item` in `field`.
    ///
    /// List fields remove an existing item, or append a new one while below
    /// [`ProfileField::max_selections`]. The communication style is simply
    /// replaced with `item`.
    pub fn toggle(&mut self, field: ProfileField, item: &str) -> Toggle {
        let Some(items) = self.selections_mut(field) else {
            self.communication_style = item.to_string();
            return Toggle::Replaced;
        };

        if let Some(pos) = items.iter().position(|i| i == item) {
            items.remove(pos);
            return Toggle::Removed;
        }

        if items.len() >= field.max_selections() {
            return Toggle::AtCapacity;
        }

        items.push(item.to_string());
        Toggle::Added
    }

    /// True when no category has been filled in.
    pub fn is_empty(&self) -> bool {
        self.communication_style.is_empty()
            && ProfileField::ALL
                .iter()
                .filter_map(|f| self.selections(*f))
                .all(|items| items.is_empty())
    }
}
