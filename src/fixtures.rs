//! Shared payloads for tests.

use crate::api::dto::{HeroDto, LocationDto, TransformationDto};

pub const GOKU_ID: &str = "D13A40E5-4418-4223-9CE6-D2F9A28EBE94";
pub const VEGETA_ID: &str = "D13A40E5-4418-4223-9CE6-D2F9A28EBE95";
pub const BULMA_ID: &str = "64143856-12D8-4EF9-9B6F-F08742098A18";
pub const PICCOLO_ID: &str = "CBCFBDEC-F89B-41A1-AC0A-FBDA66A33A06";
pub const KRILIN_ID: &str = "CBCFBDEC-F89B-41A1-AC0A-FBDA66A33A03";

fn hero(identifier: &str, name: &str, photo: &str, favorite: bool) -> HeroDto {
  HeroDto {
    identifier: Some(identifier.to_string()),
    name: Some(name.to_string()),
    info: Some(format!(
      "Sobran las presentaciones cuando se habla de {}.",
      name
    )),
    photo: Some(format!(
      "https://cdn.alfabetajuega.com/alfabetajuega/{}?width=300",
      photo
    )),
    favorite: Some(favorite),
  }
}

pub fn hero_dtos() -> Vec<HeroDto> {
  vec![
    hero(GOKU_ID, "Goku", "2020/12/goku1.jpg", false),
    hero(VEGETA_ID, "Vegeta", "2020/12/vegeta1.jpg", true),
    hero(BULMA_ID, "Bulma", "2021/01/Bulma-Dragon-Ball.jpg", false),
    hero(PICCOLO_ID, "Piccolo", "2021/01/Piccolo.jpg", true),
    hero(KRILIN_ID, "Krilin", "2021/01/Krilin.jpg", false),
  ]
}

pub fn hero_json() -> serde_json::Value {
  serde_json::to_value(hero_dtos()).unwrap()
}

pub fn goku_transformation_dtos() -> Vec<TransformationDto> {
  vec![
    TransformationDto {
      identifier: Some("17824501-1106-4815-BC7A-BFDCCEE43CC9".to_string()),
      name: Some("2. Kaio-Ken".to_string()),
      info: Some("La técnica de Kaio-sama.".to_string()),
      photo: Some("https://areajugones.sport.es/wp-content/uploads/2017/05/Goku_Kaio-Ken_Coolers_Revenge.jpg".to_string()),
      hero: Some(HeroDto::reference(GOKU_ID)),
    },
    TransformationDto {
      identifier: Some("5FE48A7C-4FE0-4E92-8F33-A1D43FC5E8A7".to_string()),
      name: Some("1. Oozaru – Gran Mono".to_string()),
      info: Some("Cómo todos los Saiyans con cola.".to_string()),
      photo: Some("https://areajugones.sport.es/wp-content/uploads/2021/05/ozarru.jpg".to_string()),
      hero: Some(HeroDto::reference(GOKU_ID)),
    },
  ]
}

pub fn piccolo_location_dtos() -> Vec<LocationDto> {
  vec![LocationDto {
    identifier: Some("ACB5ABB7-8C85-4A0F-872C-5467EDD23D7F".to_string()),
    longitude: Some("-115.3154276".to_string()),
    latitude: Some("36.1251954".to_string()),
    date: Some("2022-09-26T00:00:00Z".to_string()),
    hero: Some(HeroDto::reference(PICCOLO_ID)),
  }]
}
