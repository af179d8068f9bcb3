// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe catalog, search and craving-based recommendations.

use crate::models::{Recipe, RecipeCategory};
use crate::services::plan_view::tutorial_url;
use serde::Serialize;

const NO_CRAVINGS: &str = "Nenhum";

static RECIPES: &[Recipe] = &[
    Recipe {
        id: "1",
        title: "Crepioca de Frango Cremoso",
        category: RecipeCategory::Breakfast,
        time: "10 min",
        calories: 320,
        protein: 24,
        ingredients: &[
            "1 ovo",
            "2 colheres de sopa de goma de tapioca",
            "1 colher de requeijão light",
            "50g de frango desfiado temperado",
            "Sal a gosto",
        ],
        steps: &[
            "Misture o ovo e a tapioca até ficar homogêneo.",
            "Despeje em frigideira antiaderente em fogo baixo.",
            "Quando firmar, vire.",
            "Adicione o frango e o requeijão, dobre e sirva.",
        ],
    },
    Recipe {
        id: "2",
        title: "Panqueca de Banana Fit",
        category: RecipeCategory::Breakfast,
        time: "10 min",
        calories: 250,
        protein: 12,
        ingredients: &[
            "1 banana madura amassada",
            "2 ovos",
            "1 colher de aveia em flocos",
            "Canela a gosto",
            "Fio de mel (opcional)",
        ],
        steps: &[
            "Amasse bem a banana.",
            "Misture com os ovos e a aveia.",
            "Leve à frigideira untada com óleo de coco.",
            "Doure dos dois lados e finalize com canela.",
        ],
    },
    Recipe {
        id: "3",
        title: "Escondidinho de Batata Doce",
        category: RecipeCategory::MainMeal,
        time: "30 min",
        calories: 400,
        protein: 30,
        ingredients: &[
            "150g de batata doce cozida e amassada",
            "150g de patinho moído refogado",
            "Temperos verdes",
            "1 fatia de queijo minas",
        ],
        steps: &[
            "Faça uma camada com metade da batata doce.",
            "Adicione a carne moída.",
            "Cubra com o restante da batata.",
            "Coloque o queijo por cima e leve ao forno/airfryer para gratinar.",
        ],
    },
    Recipe {
        id: "4",
        title: "Omelete Super Proteico",
        category: RecipeCategory::MainMeal,
        time: "10 min",
        calories: 350,
        protein: 28,
        ingredients: &[
            "3 ovos",
            "Espinafre picado",
            "Tomate cereja",
            "30g de queijo cottage",
            "Orégano",
        ],
        steps: &[
            "Bata os ovos com o cottage.",
            "Misture os vegetais.",
            "Despeje na frigideira em fogo baixo.",
            "Tampe para cozinhar por igual.",
        ],
    },
    Recipe {
        id: "5",
        title: "Smoothie de Frutas Vermelhas",
        category: RecipeCategory::Snack,
        time: "5 min",
        calories: 180,
        protein: 15,
        ingredients: &[
            "1 xícara de frutas vermelhas congeladas",
            "1 scoop de Whey Protein (opcional)",
            "200ml de água de coco ou leite desnatado",
        ],
        steps: &[
            "Bata tudo no liquidificador até ficar cremoso.",
            "Beba imediatamente bem gelado.",
        ],
    },
    Recipe {
        id: "6",
        title: "Muffin Salgado de Legumes",
        category: RecipeCategory::Snack,
        time: "25 min",
        calories: 120,
        protein: 8,
        ingredients: &[
            "2 ovos",
            "Cenoura ralada",
            "Brócolis picado",
            "2 colheres de farinha de aveia",
            "Fermento em pó",
        ],
        steps: &[
            "Misture todos os ingredientes.",
            "Coloque em forminhas de silicone.",
            "Asse por 20 min a 180 graus.",
        ],
    },
    Recipe {
        id: "7",
        title: "Pizza de Frigideira Low Carb",
        category: RecipeCategory::FastFood,
        time: "15 min",
        calories: 280,
        protein: 18,
        ingredients: &[
            "1 ovo",
            "2 colheres de farinha de aveia",
            "1 colher de azeite",
            "Molho de tomate caseiro",
            "Queijo mussarela light",
            "Orégano e tomate",
        ],
        steps: &[
            "Misture ovo, aveia e azeite.",
            "Coloque na frigideira como uma panqueca grossa.",
            "Vire, adicione o molho, queijo e orégano.",
            "Tampe para derreter o queijo.",
        ],
    },
    Recipe {
        id: "8",
        title: "Hambúrguer Artesanal de Patinho",
        category: RecipeCategory::FastFood,
        time: "20 min",
        calories: 380,
        protein: 35,
        ingredients: &[
            "150g de patinho moído",
            "Temperos (sal, pimenta, alho)",
            "1 fatia de queijo prato",
            "Alface e Tomate",
            "Pão integral ou de hambúrguer fit",
        ],
        steps: &[
            "Tempere a carne e molde no formato de hambúrguer.",
            "Grelhe em frigideira bem quente ou na churrasqueira.",
            "Coloque o queijo para derreter no final.",
            "Monte no pão com salada.",
        ],
    },
    Recipe {
        id: "9",
        title: "Mousse de Chocolate Proteico",
        category: RecipeCategory::Sweets,
        time: "5 min",
        calories: 200,
        protein: 20,
        ingredients: &[
            "100g de iogurte grego natural",
            "1 colher de cacau 100%",
            "1 scoop de Whey de Chocolate",
            "Adoçante a gosto",
        ],
        steps: &[
            "Misture vigorosamente o iogurte com o whey e o cacau.",
            "Leve à geladeira por 15 min para firmar.",
            "Sirva com raspas de chocolate amargo.",
        ],
    },
    Recipe {
        id: "10",
        title: "Brigadeiro de Colher Fit",
        category: RecipeCategory::Sweets,
        time: "10 min",
        calories: 150,
        protein: 8,
        ingredients: &[
            "2 colheres de leite em pó desnatado",
            "1 colher de cacau 100%",
            "Água quente (pouca, para dar ponto)",
            "Adoçante",
        ],
        steps: &[
            "Misture os secos.",
            "Vá adicionando água quente bem aos poucos, mexendo sempre até virar um creme.",
            "Pode adicionar whey se quiser mais proteína.",
        ],
    },
];

/// The built-in recipes.
pub fn catalog() -> &'static [Recipe] {
    RECIPES
}

pub fn find_recipe(id: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.id == id)
}

/// Video search for a recipe.
pub fn recipe_tutorial_url(title: &str) -> String {
    tutorial_url(&format!("receita fit {}", title))
}

/// Category suggested by the user's stated food cravings, if any.
pub fn recommended_category(cravings: &str) -> Option<RecipeCategory> {
    if cravings.contains("Doces") {
        Some(RecipeCategory::Sweets)
    } else if ["Pizza", "Massas", "Lanches", "Hambúrguer"]
        .iter()
        .any(|c| cravings.contains(c))
    {
        Some(RecipeCategory::FastFood)
    } else {
        None
    }
}

/// `search` matches title or category label, case-insensitively.
fn matches_search(recipe: &Recipe, search: &str) -> bool {
    let term = search.trim().to_lowercase();
    term.is_empty()
        || recipe.title.to_lowercase().contains(&term)
        || recipe.category.label().to_lowercase().contains(&term)
}

/// `None` admits every recipe. The fast-food filter also admits pizza and
/// burger recipes filed under other categories.
fn matches_category(recipe: &Recipe, category: Option<RecipeCategory>) -> bool {
    match category {
        None => true,
        Some(RecipeCategory::FastFood) => {
            recipe.category == RecipeCategory::FastFood
                || recipe.title.contains("Pizza")
                || recipe.title.contains("Hambúrguer")
        }
        Some(category) => recipe.category == category,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    #[serde(flatten)]
    pub recipe: &'static Recipe,
    pub tutorial_url: String,
}

impl From<&'static Recipe> for RecipeView {
    fn from(recipe: &'static Recipe) -> Self {
        Self {
            recipe,
            tutorial_url: recipe_tutorial_url(recipe.title),
        }
    }
}

/// Recipes matching `search` within `category`.
pub fn search_recipes(search: &str, category: Option<RecipeCategory>) -> Vec<RecipeView> {
    RECIPES
        .iter()
        .filter(|r| matches_search(r, search) && matches_category(r, category))
        .map(RecipeView::from)
        .collect()
}

/// Banner text shown over a filtered list when the user has stated cravings.
pub fn craving_message(cravings: Option<&str>) -> Option<String> {
    let cravings = cravings.map(str::trim).filter(|c| !c.is_empty() && *c != NO_CRAVINGS)?;
    Some(format!(
        "Você disse que gosta de {}. Separamos estas receitas saudáveis para matar a vontade sem sair da dieta!",
        cravings
    ))
}
