//! crates/foodmatch_core/src/sample_data.rs
//!
//! Bundled sample recipes, substituted whenever the live recipe API is
//! unavailable or misconfigured, and used as the candidate pool for local
//! ingredient matching. The records mirror the upstream ranking schema and
//! pass through their own adapter function into the canonical shape.

use crate::domain::{Popularity, Recipe};
use std::sync::LazyLock;

/// A bundled record in source form. Kept separate from the canonical type so
/// sample data goes through the same explicit adapter step as API data.
struct SampleRecord {
    id: &'static str,
    category_id: &'static str,
    title: &'static str,
    source_url: &'static str,
    image_url: &'static str,
    description: &'static str,
    time: &'static str,
    cost: &'static str,
    materials: &'static [&'static str],
    instructions: &'static [&'static str],
    author: &'static str,
    pickup: bool,
    rank: &'static str,
}

const SAMPLES: &[SampleRecord] = &[
    SampleRecord {
        id: "1180006594",
        category_id: "30-166",
        title: "簡単ふわふわオムライス",
        source_url: "https://recipe.rakuten.co.jp/recipe/1180006594/",
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/example1.jpg",
        description: "卵がふわふわで美味しいオムライスです。初心者でも簡単に作れます。",
        time: "約30分",
        cost: "300円前後",
        materials: &[
            "卵 3個",
            "ご飯 200g",
            "玉ねぎ 1/2個",
            "ケチャップ 大さじ3",
            "バター 10g",
            "塩こしょう 少々",
            "牛乳 大さじ2",
        ],
        instructions: &[
            "玉ねぎをみじん切りにする",
            "フライパンでバターを熱し、玉ねぎを炒める",
            "ご飯とケチャップを加えて混ぜ合わせる",
            "卵に牛乳を加えて溶く",
            "別のフライパンで卵を焼き、ご飯を包む",
        ],
        author: "料理初心者A",
        pickup: true,
        rank: "1",
    },
    SampleRecord {
        id: "1180006595",
        category_id: "15-185",
        title: "基本の肉じゃが",
        source_url: "https://recipe.rakuten.co.jp/recipe/1180006595/",
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/example2.jpg",
        description: "家庭の定番料理、肉じゃがです。ほっこり美味しい味わい。",
        time: "約45分",
        cost: "500円前後",
        materials: &[
            "牛肉薄切り 200g",
            "じゃがいも 3個",
            "玉ねぎ 1個",
            "にんじん 1本",
            "糸こんにゃく 100g",
            "☆醤油 大さじ3",
            "☆みりん 大さじ3",
            "☆砂糖 大さじ2",
            "☆だし汁 300ml",
            "サラダ油 大さじ1",
        ],
        instructions: &[
            "じゃがいも、にんじんは一口大に切る",
            "玉ねぎはくし切りにする",
            "鍋に油を熱し、牛肉を炒める",
            "野菜を加えて炒め、☆を加える",
            "落とし蓋をして20分煮込む",
        ],
        author: "和食マスター",
        pickup: true,
        rank: "2",
    },
    SampleRecord {
        id: "1180006596",
        category_id: "17-221",
        title: "ふわふわパンケーキ",
        source_url: "https://recipe.rakuten.co.jp/recipe/1180006596/",
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/example3.jpg",
        description: "ふわふわ食感のパンケーキ。朝食やおやつに最適です。",
        time: "約20分",
        cost: "200円前後",
        materials: &[
            "ホットケーキミックス 150g",
            "卵 1個",
            "牛乳 100ml",
            "砂糖 大さじ1",
            "バター 適量",
            "メープルシロップ お好みで",
        ],
        instructions: &[
            "ボウルに卵、牛乳、砂糖を入れて混ぜる",
            "ホットケーキミックスを加えてさっくり混ぜる",
            "フライパンにバターを熱する",
            "生地を流し入れ、弱火で焼く",
            "表面がぷつぷつしたら裏返す",
        ],
        author: "スイーツ好き",
        pickup: false,
        rank: "5",
    },
    SampleRecord {
        id: "1180006597",
        category_id: "30-166",
        title: "トマトとベーコンのパスタ",
        source_url: "https://recipe.rakuten.co.jp/recipe/1180006597/",
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/example4.jpg",
        description: "シンプルで美味しいトマトソースパスタです。",
        time: "約25分",
        cost: "400円前後",
        materials: &[
            "パスタ 200g",
            "ベーコン 3枚",
            "玉ねぎ 1/2個",
            "トマト缶 1缶",
            "にんにく 1片",
            "オリーブオイル 大さじ2",
            "塩 適量",
            "こしょう 適量",
            "粉チーズ お好みで",
        ],
        instructions: &[
            "パスタを茹で始める",
            "にんにくをみじん切り、玉ねぎとベーコンを切る",
            "オリーブオイルでにんにくを炒める",
            "玉ねぎとベーコンを加えて炒める",
            "トマト缶を加えて煮込み、茹でたパスタと和える",
        ],
        author: "イタリアン太郎",
        pickup: true,
        rank: "3",
    },
    SampleRecord {
        id: "1180006598",
        category_id: "19-236",
        title: "鶏の照り焼き",
        source_url: "https://recipe.rakuten.co.jp/recipe/1180006598/",
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/example5.jpg",
        description: "甘辛いタレが絶品の鶏の照り焼きです。ご飯によく合います。",
        time: "約20分",
        cost: "300円前後",
        materials: &[
            "鶏もも肉 1枚",
            "☆醤油 大さじ2",
            "☆みりん 大さじ2",
            "☆砂糖 大さじ1",
            "☆酒 大さじ1",
            "サラダ油 小さじ1",
        ],
        instructions: &[
            "鶏肉は余分な脂を取り除く",
            "☆の調味料を混ぜ合わせておく",
            "フライパンに油を熱し、鶏肉を皮目から焼く",
            "両面焼いたら、☆のタレを加える",
            "タレを絡めながら照りが出るまで焼く",
        ],
        author: "鶏肉大好き",
        pickup: true,
        rank: "4",
    },
    SampleRecord {
        id: "1180006602",
        category_id: "31-350",
        title: "野菜たっぷりカレー",
        source_url: "https://recipe.rakuten.co.jp/recipe/1180006602/",
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/example9.jpg",
        description: "野菜がたっぷり入ったヘルシーカレーです。",
        time: "約50分",
        cost: "600円前後",
        materials: &[
            "豚肉 200g",
            "玉ねぎ 2個",
            "にんじん 1本",
            "じゃがいも 2個",
            "なす 1本",
            "カレールー 1/2箱",
            "水 600ml",
            "サラダ油 大さじ1",
        ],
        instructions: &[
            "野菜と肉を一口大に切る",
            "鍋に油を熱し、肉を炒める",
            "野菜を加えて炒める",
            "水を加えて20分煮込む",
            "カレールーを加えて溶かす",
        ],
        author: "カレー研究家",
        pickup: true,
        rank: "7",
    },
];

/// Adapter from a bundled record to the canonical shape.
fn recipe_from_sample(record: &SampleRecord) -> Recipe {
    Recipe {
        id: record.id.to_string(),
        title: record.title.to_string(),
        image_url: record.image_url.to_string(),
        description: record.description.to_string(),
        source_url: record.source_url.to_string(),
        materials: record.materials.iter().map(|m| m.to_string()).collect(),
        instructions: record.instructions.iter().map(|i| i.to_string()).collect(),
        time_estimate: record.time.to_string(),
        cost_estimate: record.cost.to_string(),
        popularity: Popularity {
            is_pickup: record.pickup,
            rank: record.rank.to_string(),
        },
        author: record.author.to_string(),
        category_id: record.category_id.to_string(),
    }
}

static SAMPLE_RECIPES: LazyLock<Vec<Recipe>> =
    LazyLock::new(|| SAMPLES.iter().map(recipe_from_sample).collect());

/// The bundled fallback sequence in canonical form.
pub fn sample_recipes() -> &'static [Recipe] {
    &SAMPLE_RECIPES
}

/// Looks a bundled recipe up by id.
pub fn sample_by_id(recipe_id: &str) -> Option<Recipe> {
    SAMPLE_RECIPES.iter().find(|r| r.id == recipe_id).cloned()
}
