use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of genres a movie may carry.
///
/// Genres serialize as their Spanish display names; the set is fixed and
/// membership is the whole validation rule — there is no dynamic extension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Genre {
    #[serde(rename = "Acción")]
    Accion,
    #[serde(rename = "Animación")]
    Animacion,
    #[serde(rename = "Aventura")]
    Aventura,
    #[serde(rename = "Biografía")]
    Biografia,
    #[serde(rename = "Comedia")]
    Comedia,
    #[serde(rename = "Ciencia Ficción")]
    CienciaFiccion,
    #[serde(rename = "Crimen")]
    Crimen,
    #[serde(rename = "Deportivo")]
    Deportivo,
    #[serde(rename = "Documental")]
    Documental,
    #[serde(rename = "Drama")]
    Drama,
    #[serde(rename = "Familiar")]
    Familiar,
    #[serde(rename = "Fantasía")]
    Fantasia,
    #[serde(rename = "Guerra")]
    Guerra,
    #[serde(rename = "Histórico")]
    Historico,
    #[serde(rename = "Misterio")]
    Misterio,
    #[serde(rename = "Musical")]
    Musical,
    #[serde(rename = "Noir")]
    Noir,
    #[serde(rename = "Romance")]
    Romance,
    #[serde(rename = "Suspenso")]
    Suspenso,
    #[serde(rename = "Terror")]
    Terror,
    #[serde(rename = "Western")]
    Western,
}

impl Genre {
    /// Every valid genre, in display order.
    pub const ALL: [Genre; 21] = [
        Genre::Accion,
        Genre::Animacion,
        Genre::Aventura,
        Genre::Biografia,
        Genre::Comedia,
        Genre::CienciaFiccion,
        Genre::Crimen,
        Genre::Deportivo,
        Genre::Documental,
        Genre::Drama,
        Genre::Familiar,
        Genre::Fantasia,
        Genre::Guerra,
        Genre::Historico,
        Genre::Misterio,
        Genre::Musical,
        Genre::Noir,
        Genre::Romance,
        Genre::Suspenso,
        Genre::Terror,
        Genre::Western,
    ];

    /// The canonical display name, as persisted and returned to clients.
    pub fn name(self) -> &'static str {
        match self {
            Genre::Accion => "Acción",
            Genre::Animacion => "Animación",
            Genre::Aventura => "Aventura",
            Genre::Biografia => "Biografía",
            Genre::Comedia => "Comedia",
            Genre::CienciaFiccion => "Ciencia Ficción",
            Genre::Crimen => "Crimen",
            Genre::Deportivo => "Deportivo",
            Genre::Documental => "Documental",
            Genre::Drama => "Drama",
            Genre::Familiar => "Familiar",
            Genre::Fantasia => "Fantasía",
            Genre::Guerra => "Guerra",
            Genre::Historico => "Histórico",
            Genre::Misterio => "Misterio",
            Genre::Musical => "Musical",
            Genre::Noir => "Noir",
            Genre::Romance => "Romance",
            Genre::Suspenso => "Suspenso",
            Genre::Terror => "Terror",
            Genre::Western => "Western",
        }
    }

    /// Case-insensitive lookup against the canonical names.
    pub fn parse(input: &str) -> Option<Genre> {
        let wanted = input.trim().to_lowercase();
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.name().to_lowercase() == wanted)
    }

    /// Comma-separated list of every valid genre name.
    pub fn valid_names() -> String {
        Genre::ALL
            .iter()
            .map(|genre| genre.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
