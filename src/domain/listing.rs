/// A property card shown in the listings strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: u32,
    pub kind: &'static str,
    pub title: &'static str,
    pub price: &'static str,
}

pub fn catalog() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            kind: "Venda",
            title: "Mansão Moderna",
            price: "R$ 4.500.000",
        },
        Listing {
            id: 2,
            kind: "Aluguel",
            title: "Cobertura Elegante",
            price: "R$ 18.000/mês",
        },
        Listing {
            id: 3,
            kind: "Venda",
            title: "Villa à Beira-Mar",
            price: "R$ 6.200.000",
        },
        Listing {
            id: 4,
            kind: "Aluguel",
            title: "Apartamento Premium",
            price: "R$ 12.500/mês",
        },
    ]
}
