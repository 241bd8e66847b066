/// One catalog entry: stable id + display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
}

/// The fixed demo catalog. Every generated row references one of these.
pub const CATALOG: [Product; 5] = [
    Product { id: "P001", name: "Amoxicillin 500mg" },
    Product { id: "P002", name: "Paracetamol 500mg" },
    Product { id: "P003", name: "Cetirizine 10mg" },
    Product { id: "P004", name: "Vitamin C 1000mg" },
    Product { id: "P005", name: "Omeprazole 20mg" },
];
