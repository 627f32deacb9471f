//! # Demo Data
//!
//! The static data set the counter runs on: ten products across six
//! therapeutic categories, three customers and two past sales.
//!
//! Prices are in FCFA. Every product is priced at a 40% margin over cost.

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{Customer, LoyaltyTier, PaymentMethod, Product, Sale, SaleItem};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap_or_default()
}

/// Column order of the demo product table below.
struct Row {
    id: &'static str,
    name: &'static str,
    price: i64,
    stock: i64,
    category: &'static str,
    barcode: &'static str,
    equivalents: &'static [&'static str],
    expiry: (i32, u32, u32),
    supplier: &'static str,
    popularity: u32,
    cost: i64,
    description: &'static str,
    dosage: &'static str,
    ingredient: &'static str,
    prescription: bool,
}

const PRODUCTS: &[Row] = &[
    Row {
        id: "1",
        name: "Paracétamol 500mg",
        price: 1750,
        stock: 150,
        category: "Antalgiques",
        barcode: "3401579887145",
        equivalents: &["2", "3"],
        expiry: (2025, 12, 31),
        supplier: "Sanofi",
        popularity: 95,
        cost: 1050,
        description: "Médicament contre la douleur et la fièvre",
        dosage: "500mg",
        ingredient: "Paracétamol",
        prescription: false,
    },
    Row {
        id: "2",
        name: "Doliprane 1000mg",
        price: 2100,
        stock: 85,
        category: "Antalgiques",
        barcode: "3401552991254",
        equivalents: &["1", "3"],
        expiry: (2025, 8, 15),
        supplier: "Sanofi",
        popularity: 88,
        cost: 1260,
        description: "Antalgique et antipyrétique",
        dosage: "1000mg",
        ingredient: "Paracétamol",
        prescription: false,
    },
    Row {
        id: "3",
        name: "Efferalgan 500mg",
        price: 1900,
        stock: 120,
        category: "Antalgiques",
        barcode: "3401560023456",
        equivalents: &["1", "2"],
        expiry: (2025, 10, 20),
        supplier: "UPSA",
        popularity: 75,
        cost: 1140,
        description: "Antalgique effervescent",
        dosage: "500mg",
        ingredient: "Paracétamol",
        prescription: false,
    },
    Row {
        id: "4",
        name: "Amoxicilline 1g",
        price: 4450,
        stock: 45,
        category: "Antibiotiques",
        barcode: "3401579102456",
        equivalents: &["5"],
        expiry: (2025, 6, 30),
        supplier: "Biogaran",
        popularity: 65,
        cost: 2670,
        description: "Antibiotique à large spectre",
        dosage: "1g",
        ingredient: "Amoxicilline",
        prescription: true,
    },
    Row {
        id: "5",
        name: "Clamoxyl 1g",
        price: 4750,
        stock: 32,
        category: "Antibiotiques",
        barcode: "3401552334567",
        equivalents: &["4"],
        expiry: (2025, 9, 15),
        supplier: "GSK",
        popularity: 55,
        cost: 2850,
        description: "Antibiotique amoxicilline",
        dosage: "1g",
        ingredient: "Amoxicilline",
        prescription: true,
    },
    Row {
        id: "6",
        name: "Aspirine 500mg",
        price: 1450,
        stock: 200,
        category: "Antalgiques",
        barcode: "3401579445678",
        equivalents: &[],
        expiry: (2026, 3, 10),
        supplier: "Bayer",
        popularity: 70,
        cost: 870,
        description: "Anti-inflammatoire non stéroïdien",
        dosage: "500mg",
        ingredient: "Acide acétylsalicylique",
        prescription: false,
    },
    Row {
        id: "7",
        name: "Serum physiologique",
        price: 750,
        stock: 300,
        category: "Hygiène",
        barcode: "3401560123789",
        equivalents: &[],
        expiry: (2026, 12, 31),
        supplier: "Gilbert",
        popularity: 85,
        cost: 450,
        description: "Solution saline stérile",
        dosage: "5ml x 20",
        ingredient: "Chlorure de sodium",
        prescription: false,
    },
    Row {
        id: "8",
        name: "Smecta",
        price: 3100,
        stock: 78,
        category: "Gastro-entérologie",
        barcode: "3401579667890",
        equivalents: &[],
        expiry: (2025, 11, 20),
        supplier: "Ipsen",
        popularity: 60,
        cost: 1860,
        description: "Traitement symptomatique de la diarrhée",
        dosage: "3g",
        ingredient: "Diosmectite",
        prescription: false,
    },
    Row {
        id: "9",
        name: "Vitamine D3",
        price: 6250,
        stock: 65,
        category: "Vitamines",
        barcode: "3401552778901",
        equivalents: &[],
        expiry: (2025, 7, 15),
        supplier: "Crinex",
        popularity: 45,
        cost: 3750,
        description: "Supplément vitaminique",
        dosage: "100000 UI",
        ingredient: "Cholécalciférol",
        prescription: false,
    },
    Row {
        id: "10",
        name: "Ventoline",
        price: 7900,
        stock: 25,
        category: "Pneumologie",
        barcode: "3401579889012",
        equivalents: &[],
        expiry: (2025, 5, 30),
        supplier: "GSK",
        popularity: 40,
        cost: 4740,
        description: "Bronchodilatateur",
        dosage: "100μg/dose",
        ingredient: "Salbutamol",
        prescription: true,
    },
];

impl Row {
    fn to_product(&self) -> Product {
        let price = Money::from_amount(self.price);
        let cost_price = Money::from_amount(self.cost);
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            price,
            cost_price,
            margin: price.margin_percent_over(cost_price),
            stock: self.stock,
            category: self.category.to_string(),
            barcode: Some(self.barcode.to_string()),
            equivalents: self.equivalents.iter().map(|s| s.to_string()).collect(),
            expiry_date: Some(date(self.expiry.0, self.expiry.1, self.expiry.2)),
            supplier: self.supplier.to_string(),
            popularity: self.popularity,
            dosage: Some(self.dosage.to_string()),
            active_ingredient: Some(self.ingredient.to_string()),
            prescription: self.prescription,
        }
    }
}

/// The ten demo products, in catalog order.
pub fn demo_products() -> Vec<Product> {
    PRODUCTS.iter().map(Row::to_product).collect()
}

/// The demo catalog.
pub fn demo_catalog() -> Catalog {
    Catalog::new(demo_products())
}

/// Three registered customers, one per loyalty tier.
pub fn demo_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "1".to_string(),
            name: "Fatou Ouédraogo".to_string(),
            phone: Some("0123456789".to_string()),
            email: Some("fatou.ouedraogo@email.com".to_string()),
            address: Some("123 Avenue de la Nation, Secteur 15, Ouagadougou".to_string()),
            date_of_birth: Some(date(1980, 5, 15)),
            allergies: vec!["Pénicilline".to_string()],
            prescriptions: vec!["Hypertension".to_string()],
            last_visit: Some(date(2024, 1, 20)),
            total_purchases: Money::from_amount(225_250),
            loyalty: LoyaltyTier::Gold,
        },
        Customer {
            id: "2".to_string(),
            name: "Moussa Konaté".to_string(),
            phone: Some("0198765432".to_string()),
            email: Some("moussa.konate@email.com".to_string()),
            address: Some("456 Rue du Commerce, Zone 4, Bobo-Dioulasso".to_string()),
            date_of_birth: Some(date(1975, 9, 22)),
            allergies: Vec::new(),
            prescriptions: vec!["Diabète type 2".to_string()],
            last_visit: Some(date(2024, 1, 18)),
            total_purchases: Money::from_amount(140_150),
            loyalty: LoyaltyTier::Silver,
        },
        Customer {
            id: "3".to_string(),
            name: "Aminata Sawadogo".to_string(),
            phone: Some("0156785112".to_string()),
            email: Some("aminata.sawadogo@email.com".to_string()),
            address: Some("789 Boulevard de l'Indépendance, Koudougou".to_string()),
            date_of_birth: Some(date(1992, 12, 3)),
            allergies: vec!["Aspirine".to_string()],
            prescriptions: Vec::new(),
            last_visit: Some(date(2024, 1, 15)),
            total_purchases: Money::from_amount(62_900),
            loyalty: LoyaltyTier::Bronze,
        },
    ]
}

fn sale_item(product: &Product, quantity: i64) -> SaleItem {
    SaleItem {
        product_id: product.id.clone(),
        name_snapshot: product.name.clone(),
        category_snapshot: product.category.clone(),
        quantity,
        unit_price: product.price,
        total: product.price.multiply_quantity(quantity),
    }
}

/// Two past sales on 2024-01-20.
pub fn demo_sales() -> Vec<Sale> {
    let products = demo_products();
    let first = vec![sale_item(&products[0], 2), sale_item(&products[3], 1)];
    let second = vec![sale_item(&products[6], 3)];

    vec![
        Sale {
            id: "1".to_string(),
            date: datetime(2024, 1, 20, 10, 30),
            customer_id: Some("1".to_string()),
            customer_name: Some("Fatou Ouédraogo".to_string()),
            subtotal: Money::from_amount(7950),
            tax: Money::zero(),
            total: Money::from_amount(7950),
            items: first,
            payment_method: PaymentMethod::Card,
            cashier_id: "cashier1".to_string(),
        },
        Sale {
            id: "2".to_string(),
            date: datetime(2024, 1, 20, 14, 15),
            customer_id: Some("2".to_string()),
            customer_name: Some("Moussa Konaté".to_string()),
            subtotal: Money::from_amount(2250),
            tax: Money::zero(),
            total: Money::from_amount(2250),
            items: second,
            payment_method: PaymentMethod::Cash,
            cashier_id: "cashier1".to_string(),
        },
    ]
}
