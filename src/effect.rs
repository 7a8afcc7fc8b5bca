#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadDex,
    LoadTypes,
    LoadCustomIndex,
    LoadPokemonDetail { name: String },
    LoadSpecies { name: String },
    LoadEvolutionChain { id: String, url: String },
    LoadTypeDetail { name: String },
    LoadMoveDetail { name: String },
    DeleteCustom { name: String },
}
