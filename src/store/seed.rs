//! Default dataset written to an empty backend on first use and by
//! factory resets.

use chrono::{NaiveDate, Utc};

use crate::types::{
    AppliesTo, Banner, DiscountType, DisplayMode, Listing, Product, Promotion, Section,
    SectionBody, Store, StoreConfig,
};

const UNSPLASH: &str = "https://images.unsplash.com/photo-";

fn image(photo: &str, width: u32, height: u32) -> String {
    format!("{UNSPLASH}{photo}?ixlib=rb-4.0.3&auto=format&fit=crop&w={width}&h={height}&q=80")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn store(id: &str, name: &str, description: &str, is_active: bool, theme: &str) -> Store {
    Store {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        is_active,
        game_id: Some("game1".to_string()),
        theme: Some(theme.to_string()),
    }
}

pub fn stores() -> Vec<Store> {
    vec![
        store(
            "store1",
            "Boutique principale",
            "La boutique principale du jeu",
            true,
            "default",
        ),
        store(
            "store2",
            "Boutique événement Halloween",
            "Boutique spéciale pour Halloween",
            true,
            "halloween",
        ),
        store(
            "store3",
            "Boutique Noël",
            "Offres spéciales pour les fêtes",
            false,
            "christmas",
        ),
    ]
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    photo: &str,
    category: &str,
    store_id: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        currency: "gold".to_string(),
        image_url: image(photo, 600, 600),
        category: category.to_string(),
        is_active: true,
        store_id: store_id.to_string(),
        tags: None,
        discount_percentage: None,
        stock: None,
        start_date: None,
        end_date: None,
    }
}

#[rustfmt::skip]
pub fn products() -> Vec<Product> {
    vec![
        product("1", "Épée de feu", "Une épée légendaire forgée dans les flammes du dragon", 1200.0, "1546182990-dffeafbe841d", "weapons", "store1"),
        product("2", "Potion de santé", "Restaure instantanément 50 points de vie", 100.0, "1514733670139-4d87a1941d55", "potions", "store1"),
        product("3", "Bouclier de protection", "Réduit les dégâts subis de 30%", 800.0, "1531751519034-8c7e11488899", "armor", "store1"),
        product("4", "Arc enchanté", "Un arc qui ne rate jamais sa cible", 950.0, "1534423861386-85a16f5d13fd", "weapons", "store1"),
        product("5", "Potion de mana", "Récupère 75 points de mana", 150.0, "1602928298849-325cec8771c0", "potions", "store1"),
        product("6", "Armure en diamant", "L'armure la plus résistante du royaume", 2000.0, "1550355291-bbee04a92027", "armor", "store1"),
        product("7", "Bâton de foudre", "Invoque la puissance des cieux", 1500.0, "1564979268369-9fa149f43fe0", "weapons", "store1"),
        product("8", "Masque effrayant", "Un masque qui terrifie vos ennemis", 500.0, "1634316427425-582a17fc5c65", "misc", "store2"),
        product("9", "Chapeau de Père Noël", "Joyeux Noël à tous !", 300.0, "1543589077-47d81606c1bf", "misc", "store3"),
        product("10", "Dague d'ombre", "Une dague qui permet de se fondre dans les ombres", 850.0, "1590179068383-b9c69aacebd3", "weapons", "store1"),
        product("11", "Potion d'invisibilité", "Devient invisible pendant 30 secondes", 300.0, "1612627038504-5d9765c5a9ae", "potions", "store1"),
        product("12", "Casque du courage", "Augmente la résistance à la peur de 50%", 650.0, "1595079664698-33be41bc7566", "armor", "store1"),
    ]
}

pub fn promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            id: "promo1".to_string(),
            store_id: "store1".to_string(),
            name: "Summer Sale".to_string(),
            code: "SUMMER2025".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 20.0,
            start_date: date(2025, 6, 1),
            end_date: date(2025, 8, 31),
            is_active: true,
            applies_to: AppliesTo::All,
            product_ids: Vec::new(),
            minimum_purchase: 0.0,
            usage_limit: 0,
            usage_count: 45,
        },
        Promotion {
            id: "promo2".to_string(),
            store_id: "store1".to_string(),
            name: "New User Discount".to_string(),
            code: "WELCOME".to_string(),
            discount_type: DiscountType::Fixed,
            discount_value: 10.0,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
            is_active: true,
            applies_to: AppliesTo::All,
            product_ids: Vec::new(),
            minimum_purchase: 50.0,
            usage_limit: 1,
            usage_count: 128,
        },
        Promotion {
            id: "promo3".to_string(),
            store_id: "store2".to_string(),
            name: "Limited Time Offer".to_string(),
            code: "FLASH25".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 25.0,
            start_date: date(2025, 4, 1),
            end_date: date(2025, 4, 15),
            is_active: false,
            applies_to: AppliesTo::Specific,
            product_ids: vec!["8".to_string()],
            minimum_purchase: 0.0,
            usage_limit: 100,
            usage_count: 42,
        },
    ]
}

fn banner(id: &str, photo: &str, title: &str, description: &str, link: &str, position: u32) -> Banner {
    Banner {
        id: id.to_string(),
        image_url: image(photo, 1200, 400),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        link_url: Some(link.to_string()),
        position,
        is_active: true,
    }
}

fn listing(title: &str, display_mode: DisplayMode, item_ids: &[&str]) -> Listing {
    Listing {
        title: Some(title.to_string()),
        display_mode,
        item_ids: item_ids.iter().map(|id| (*id).to_string()).collect(),
    }
}

pub fn store_configs() -> Vec<StoreConfig> {
    let sections = vec![
        Section {
            id: "section1".to_string(),
            position: 1,
            is_active: true,
            body: SectionBody::Banner {
                banners: vec![banner(
                    "banner1",
                    "1511882150382-421056c89033",
                    "Nouvelles armes disponibles!",
                    "Découvrez notre nouvelle collection d'armes légendaires",
                    "/products?category=weapons",
                    1,
                )],
            },
        },
        Section {
            id: "section2".to_string(),
            position: 2,
            is_active: true,
            body: SectionBody::Carousel(listing(
                "Produits populaires",
                DisplayMode::Default,
                &["1", "2", "3"],
            )),
        },
        Section {
            id: "section3".to_string(),
            position: 3,
            is_active: true,
            body: SectionBody::Grid(listing(
                "Tous les produits",
                DisplayMode::Compact,
                &["4", "5", "6", "7"],
            )),
        },
        Section {
            id: "section4".to_string(),
            position: 4,
            is_active: true,
            body: SectionBody::Banner {
                banners: vec![
                    banner(
                        "banner2",
                        "1579546929518-9e396f3cc809",
                        "Offre spéciale",
                        "-20% sur toutes les potions",
                        "/products?category=potions",
                        1,
                    ),
                    banner(
                        "banner3",
                        "1542751371-adc38448a05e",
                        "Événement Spécial",
                        "Participez à notre tournoi mensuel",
                        "/events",
                        2,
                    ),
                ],
            },
        },
    ];

    vec![StoreConfig {
        id: "config1".to_string(),
        store_id: "store1".to_string(),
        sections,
        last_modified: Utc::now(),
    }]
}
