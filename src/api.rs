use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::evolution::EvolutionNode;
use crate::matchup::DamageRelationSet;
use crate::state::{
    CustomAbility, CustomPokemon, CustomStats, DexEntry, MoveDetail, PokemonDetail,
    PokemonSpecies, PokemonStat, TypeDetail,
};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const CUSTOM_BASE_ENV: &str = "CUSTOM_DEX_BASE";
const CUSTOM_BASE_DEFAULT: &str = "http://localhost:8000/api/v1";

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    name: String,
    pokemon: Vec<TypePokemonEntry>,
    damage_relations: DamageRelationsResponse,
}

#[derive(Clone, Debug, Deserialize)]
struct DamageRelationsResponse {
    no_damage_to: Vec<NamedResource>,
    half_damage_to: Vec<NamedResource>,
    double_damage_to: Vec<NamedResource>,
    no_damage_from: Vec<NamedResource>,
    half_damage_from: Vec<NamedResource>,
    double_damage_from: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    moves: Vec<PokemonMoveSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveDetailResponse {
    name: String,
    power: Option<u16>,
    accuracy: Option<u16>,
    pp: Option<u16>,
    effect_entries: Vec<EffectEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct EffectEntry {
    effect: String,
    short_effect: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    name: String,
    flavor_text_entries: Vec<FlavorTextEntry>,
    genera: Vec<GenusEntry>,
    shape: Option<NamedResource>,
    color: Option<NamedResource>,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct GenusEntry {
    genus: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    evolves_to: Vec<ChainLink>,
}

#[derive(Clone, Debug, Deserialize)]
struct CustomPokemonResponse {
    pk: String,
    types: Vec<String>,
    stats: CustomStatsResponse,
    abilities: Vec<CustomAbilityResponse>,
    genus: String,
    shape: String,
    color: String,
    description: String,
    feet: u16,
    inches: u16,
    weight: u16,
    #[serde(default)]
    evolves_from: Option<String>,
    #[serde(default)]
    evolves_to: Option<String>,
    #[serde(default)]
    deleted: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct CustomStatsResponse {
    hp: u16,
    atk: u16,
    def: u16,
    sp_atk: u16,
    sp_def: u16,
    speed: u16,
}

#[derive(Clone, Debug, Deserialize)]
struct CustomAbilityResponse {
    name: String,
    #[serde(default)]
    hidden: bool,
}

/// The full national index in one request; entry IDs come from the
/// resource URLs since the list endpoint carries no explicit ID field.
pub async fn fetch_dex() -> Result<Vec<DexEntry>, String> {
    let url = format!("{API_BASE}/pokemon?limit=100000");
    let response: ListResponse = fetch_json_cached(&url).await?;
    let mut entries: Vec<DexEntry> = response
        .results
        .into_iter()
        .filter_map(|entry| {
            let id = id_from_url(&entry.url)?;
            Some(DexEntry {
                id,
                name: entry.name,
            })
        })
        .collect();
    entries.sort_by_key(|entry| entry.id);
    Ok(entries)
}

pub async fn fetch_type_list() -> Result<Vec<String>, String> {
    let url = format!("{API_BASE}/type?limit=999");
    let response: ListResponse = fetch_json_cached(&url).await?;
    let mut types: Vec<String> = response
        .results
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| name != "unknown" && name != "shadow")
        .collect();
    types.sort();
    Ok(types)
}

pub async fn fetch_type_detail(name: &str) -> Result<TypeDetail, String> {
    let url = format!("{API_BASE}/type/{name}");
    let response: TypeDetailResponse = fetch_json_cached(&url).await?;
    Ok(TypeDetail {
        name: response.name,
        relations: DamageRelationSet {
            no_damage_to: names(response.damage_relations.no_damage_to),
            half_damage_to: names(response.damage_relations.half_damage_to),
            double_damage_to: names(response.damage_relations.double_damage_to),
            no_damage_from: names(response.damage_relations.no_damage_from),
            half_damage_from: names(response.damage_relations.half_damage_from),
            double_damage_from: names(response.damage_relations.double_damage_from),
        },
        members: response
            .pokemon
            .into_iter()
            .map(|entry| entry.pokemon.name)
            .collect(),
    })
}

pub async fn fetch_pokemon_detail(name: &str) -> Result<PokemonDetail, String> {
    let url = format!("{API_BASE}/pokemon/{name}");
    let response: PokemonResponse = fetch_json_cached(&url).await?;
    Ok(PokemonDetail {
        id: response.id,
        name: response.name,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        stats: response
            .stats
            .into_iter()
            .map(|slot| PokemonStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        moves: response
            .moves
            .into_iter()
            .map(|slot| slot.move_info.name)
            .collect(),
        height: response.height,
        weight: response.weight,
    })
}

pub async fn fetch_pokemon_species(name: &str) -> Result<PokemonSpecies, String> {
    let url = format!("{API_BASE}/pokemon-species/{name}");
    let response: PokemonSpeciesResponse = fetch_json_cached(&url).await?;
    let flavor_text = response
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| sanitize_text(&entry.flavor_text));
    let genus = response
        .genera
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| entry.genus.clone());
    Ok(PokemonSpecies {
        name: response.name,
        flavor_text,
        genus,
        shape: response.shape.map(|shape| shape.name),
        color: response.color.map(|color| color.name),
        evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
    })
}

pub async fn fetch_evolution_chain(url: &str) -> Result<EvolutionNode, String> {
    let response: EvolutionChainResponse = fetch_json_cached(url).await?;
    Ok(chain_node(response.chain))
}

pub async fn fetch_move_detail(name: &str) -> Result<MoveDetail, String> {
    let url = format!("{API_BASE}/move/{name}");
    let response: MoveDetailResponse = fetch_json_cached(&url).await?;
    Ok(MoveDetail {
        name: response.name,
        power: response.power,
        accuracy: response.accuracy,
        pp: response.pp,
        effect: effect_text(&response.effect_entries),
    })
}

/// Custom entries come from the secondary CRUD service and are never
/// disk-cached: the whole point of the list is freshness after edits
/// and deletes. Soft-deleted rows are filtered out here.
pub async fn fetch_custom_index() -> Result<Vec<CustomPokemon>, String> {
    let url = format!("{}/pokemon", custom_base());
    let response = http_client()
        .get(&url)
        .send()
        .await
        .map_err(|err| err.to_string())?
        .error_for_status()
        .map_err(|err| err.to_string())?;
    let entries: Vec<CustomPokemonResponse> =
        response.json().await.map_err(|err| err.to_string())?;
    let mut custom: Vec<CustomPokemon> = entries
        .into_iter()
        .filter(|entry| !entry.deleted)
        .map(|entry| CustomPokemon {
            name: entry.pk,
            types: entry.types,
            stats: CustomStats {
                hp: entry.stats.hp,
                atk: entry.stats.atk,
                def: entry.stats.def,
                sp_atk: entry.stats.sp_atk,
                sp_def: entry.stats.sp_def,
                speed: entry.stats.speed,
            },
            abilities: entry
                .abilities
                .into_iter()
                .map(|ability| CustomAbility {
                    name: ability.name,
                    hidden: ability.hidden,
                })
                .collect(),
            genus: entry.genus,
            shape: entry.shape,
            color: entry.color,
            description: entry.description,
            feet: entry.feet,
            inches: entry.inches,
            weight: entry.weight,
            evolves_from: entry.evolves_from,
            evolves_to: entry.evolves_to,
        })
        .collect();
    custom.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(custom)
}

pub async fn delete_custom_pokemon(name: &str) -> Result<(), String> {
    let url = format!("{}/pokemon/{name}", custom_base());
    http_client()
        .delete(&url)
        .send()
        .await
        .map_err(|err| err.to_string())?
        .error_for_status()
        .map_err(|err| err.to_string())?;
    Ok(())
}

fn custom_base() -> String {
    std::env::var(CUSTOM_BASE_ENV).unwrap_or_else(|_| CUSTOM_BASE_DEFAULT.to_string())
}

fn names(resources: Vec<NamedResource>) -> Vec<String> {
    resources.into_iter().map(|entry| entry.name).collect()
}

fn chain_node(link: ChainLink) -> EvolutionNode {
    EvolutionNode {
        species: link.species.name,
        evolves_to: link.evolves_to.into_iter().map(chain_node).collect(),
    }
}

fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').split('/').next_back()?.parse().ok()
}

fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

fn effect_text(entries: &[EffectEntry]) -> Option<String> {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| {
            let text = if entry.short_effect.is_empty() {
                &entry.effect
            } else {
                &entry.short_effect
            };
            sanitize_text(text)
        })
}

async fn fetch_json_cached<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let bytes = fetch_bytes_cached(url).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            let cache_path = cache_path("http", url);
            let _ = fs::remove_file(&cache_path).await;
            Err(err.to_string())
        }
    }
}

async fn fetch_bytes_cached(url: &str) -> Result<Vec<u8>, String> {
    let cache_path = cache_path("http", url);
    if let Some(bytes) = read_cache(&cache_path).await {
        return Ok(bytes);
    }

    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| err.to_string())?
        .to_vec();
    write_cache(&cache_path, &bytes).await;
    Ok(bytes)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

fn cache_root() -> PathBuf {
    let base = std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    base.join(".cache").join("pokedex-tui")
}

fn cache_path(kind: &str, url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    cache_root().join(kind).join(digest)
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    if let Ok(bytes) = fs::read(path).await {
        return Some(bytes);
    }
    None
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    let _ = fs::write(path, bytes).await;
}
