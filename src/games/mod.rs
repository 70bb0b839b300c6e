pub mod scramble;

use crate::error::{Result, ScrambleError};
use crate::words::{self, WordList};

pub struct PackDescriptor
{
    pub name: &'static str,
    pub description: &'static str,
    pub words: &'static [&'static str],
}

pub fn registry() -> Vec<PackDescriptor>
{
    vec![PackDescriptor {
        name: "names",
        description: "Companies, brands and tech names",
        words: words::COMPANY_NAMES,
    },
    PackDescriptor {
        name: "animals",
        description: "Animals from land, sea and sky",
        words: words::ANIMAL_NAMES,
    },
    PackDescriptor {
        name: "tech",
        description: "Everyday computing terms",
        words: words::TECH_TERMS,
    }]
}

pub fn load_pack(name: &str) -> Result<WordList>
{
    registry()
        .into_iter()
        .find(|pack| pack.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ScrambleError::UnknownPack(name.to_string()))
        .and_then(|pack| WordList::new(pack.words.iter()))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn default_pack_comes_first()
    {
        let registry = registry();
        assert_eq!(registry[0].name, "names");
        assert_eq!(registry[0].words.len(), 20);
    }

    #[test]
    fn packs_load_by_name_ignoring_case()
    {
        let list = load_pack("Animals").unwrap();
        assert_eq!(list.first(), "ELEPHANT");
    }

    #[test]
    fn unknown_pack_is_an_error()
    {
        assert!(matches!(load_pack("planets"), Err(ScrambleError::UnknownPack(name)) if name == "planets"));
    }
}
