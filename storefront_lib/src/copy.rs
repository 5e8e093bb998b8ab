//! Portuguese copy for toasts and confirmations, derived from each
//! resource's noun and grammatical gender.

use storefront_api::types::EntityStatus;
use storefront_api::{Categories, Products, Resource};

use crate::notify::Toast;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Feminine,
    Masculine,
}

/// How a resource is named in user-facing text.
#[derive(Clone, Copy, Debug)]
pub struct Noun {
    pub singular: &'static str,
    pub plural: &'static str,
    pub gender: Gender,
}

impl Noun {
    /// Definite article: "a" / "o".
    pub fn article(&self) -> &'static str {
        match self.gender {
            Gender::Feminine => "a",
            Gender::Masculine => "o",
        }
    }

    /// "de" contracted with the article: "da" / "do".
    pub fn of(&self) -> &'static str {
        match self.gender {
            Gender::Feminine => "da",
            Gender::Masculine => "do",
        }
    }

    /// Demonstrative: "esta" / "este".
    pub fn this(&self) -> &'static str {
        match self.gender {
            Gender::Feminine => "esta",
            Gender::Masculine => "este",
        }
    }

    /// Inflects a participle stem such as `criad` for this noun.
    pub fn participle(&self, stem: &str) -> String {
        format!("{}{}", stem, self.article())
    }

    pub fn capitalized(&self) -> String {
        capitalize(self.singular)
    }
}

/// Resources that know how they are named.
pub trait ResourceCopy: Resource {
    const NOUN: Noun;
}

impl ResourceCopy for Categories {
    const NOUN: Noun = Noun {
        singular: "categoria",
        plural: "categorias",
        gender: Gender::Feminine,
    };
}

impl ResourceCopy for Products {
    const NOUN: Noun = Noun {
        singular: "produto",
        plural: "produtos",
        gender: Gender::Masculine,
    };
}

/// Form actions that share the "X criada com sucesso" copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Create,
    Edit,
    Delete,
}

impl Verb {
    fn infinitive(self) -> &'static str {
        match self {
            Verb::Create => "criar",
            Verb::Edit => "editar",
            Verb::Delete => "deletar",
        }
    }

    fn stem(self) -> &'static str {
        match self {
            Verb::Create => "criad",
            Verb::Edit => "editad",
            Verb::Delete => "deletad",
        }
    }
}

pub fn success(noun: &Noun, verb: Verb) -> Toast {
    let participle = noun.participle(verb.stem());
    Toast::success(
        format!("{} {} com sucesso", noun.capitalized(), participle),
        format!(
            "{} {} foi {} com sucesso",
            capitalize(noun.article()),
            noun.singular,
            participle
        ),
    )
}

pub fn failure(noun: &Noun, verb: Verb) -> Toast {
    Toast::error(
        format!("Erro ao {} {}", verb.infinitive(), noun.singular),
        format!(
            "Ocorreu um erro ao {} {} {}",
            verb.infinitive(),
            noun.article(),
            noun.singular
        ),
    )
}

pub fn status_changed(noun: &Noun, status: EntityStatus) -> Toast {
    let stem = match status {
        EntityStatus::Active => "ativad",
        EntityStatus::Inactive => "desativad",
    };
    Toast::success(
        format!("Status {} {} alterado com sucesso", noun.of(), noun.singular),
        format!("{} {} com sucesso", noun.capitalized(), noun.participle(stem)),
    )
}

pub fn status_failed(noun: &Noun) -> Toast {
    Toast::error(
        format!("Erro ao alterar status {} {}", noun.of(), noun.singular),
        format!(
            "Ocorreu um erro ao alterar o status {} {}",
            noun.of(),
            noun.singular
        ),
    )
}

pub fn image_updated(noun: &Noun) -> Toast {
    Toast::success(
        "Imagem atualizada com sucesso",
        format!("A imagem {} {} foi atualizada", noun.of(), noun.singular),
    )
}

pub fn image_failed(noun: &Noun) -> Toast {
    Toast::error(
        "Erro ao atualizar imagem",
        format!(
            "Ocorreu um erro ao atualizar a imagem {} {}",
            noun.of(),
            noun.singular
        ),
    )
}

pub fn invalid_file() -> Toast {
    Toast::error(
        "Arquivo inválido",
        "Por favor, selecione apenas arquivos de imagem",
    )
}

pub fn missing_file() -> Toast {
    Toast::error(
        "Nenhuma imagem selecionada",
        "Por favor, selecione uma imagem para fazer o upload",
    )
}

/// Confirmation verb for the status switch, chosen from the current state.
pub fn toggle_verb(currently: EntityStatus) -> &'static str {
    match currently {
        EntityStatus::Active => "desativar",
        EntityStatus::Inactive => "ativar",
    }
}

pub fn confirm_prompt(noun: &Noun, verb: &str) -> String {
    format!(
        "Tem certeza que deseja {} {} {}?",
        verb,
        noun.this(),
        noun.singular
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
