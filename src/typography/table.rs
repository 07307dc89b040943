//! Embedded fallback Zhuyin table.
//!
//! Covers the vocabulary the word cards ship with. Readings are the standalone (dictionary)
//! reading; a neutral tone mark is stored trailing like the other tones.

/// Zhuyin reading for a Han character from the embedded table.
pub fn zhuyin_for(ch: char) -> Option<&'static str> {
    let reading = match ch {
        // weather and nature
        '冰' => "ㄅㄧㄥ",
        '雪' => "ㄒㄩㄝˇ",
        '雨' => "ㄩˇ",
        '風' => "ㄈㄥ",
        '雲' => "ㄩㄣˊ",
        '天' => "ㄊㄧㄢ",
        '日' => "ㄖˋ",
        '月' => "ㄩㄝˋ",
        '星' => "ㄒㄧㄥ",
        '山' => "ㄕㄢ",
        '水' => "ㄕㄨㄟˇ",
        '火' => "ㄏㄨㄛˇ",
        '花' => "ㄏㄨㄚ",
        '樹' => "ㄕㄨˋ",
        '草' => "ㄘㄠˇ",
        // animals
        '貓' => "ㄇㄠ",
        '狗' => "ㄍㄡˇ",
        '魚' => "ㄩˊ",
        '鳥' => "ㄋㄧㄠˇ",
        '馬' => "ㄇㄚˇ",
        '牛' => "ㄋㄧㄡˊ",
        '羊' => "ㄧㄤˊ",
        '豬' => "ㄓㄨ",
        '雞' => "ㄐㄧ",
        '鴨' => "ㄧㄚ",
        '兔' => "ㄊㄨˋ",
        '象' => "ㄒㄧㄤˋ",
        '熊' => "ㄒㄩㄥˊ",
        '虎' => "ㄏㄨˇ",
        '獅' => "ㄕ",
        '蛇' => "ㄕㄜˊ",
        // food
        '蘋' => "ㄆㄧㄥˊ",
        '果' => "ㄍㄨㄛˇ",
        '香' => "ㄒㄧㄤ",
        '蕉' => "ㄐㄧㄠ",
        '蛋' => "ㄉㄢˋ",
        '糕' => "ㄍㄠ",
        '奶' => "ㄋㄞˇ",
        '茶' => "ㄔㄚˊ",
        '米' => "ㄇㄧˇ",
        '麵' => "ㄇㄧㄢˋ",
        '淇' => "ㄑㄧˊ",
        '淋' => "ㄌㄧㄣˊ",
        // people and body
        '人' => "ㄖㄣˊ",
        '我' => "ㄨㄛˇ",
        '你' => "ㄋㄧˇ",
        '手' => "ㄕㄡˇ",
        '口' => "ㄎㄡˇ",
        '眼' => "ㄧㄢˇ",
        '耳' => "ㄦˇ",
        '頭' => "ㄊㄡˊ",
        // things
        '書' => "ㄕㄨ",
        '車' => "ㄔㄜ",
        '船' => "ㄔㄨㄢˊ",
        '球' => "ㄑㄧㄡˊ",
        '門' => "ㄇㄣˊ",
        '學' => "ㄒㄩㄝˊ",
        '生' => "ㄕㄥ",
        '字' => "ㄗˋ",
        '大' => "ㄉㄚˋ",
        '小' => "ㄒㄧㄠˇ",
        '子' => "ㄗˇ",
        // particles
        '的' => "ㄉㄜ˙",
        '們' => "ㄇㄣ˙",
        _ => return None,
    };
    Some(reading)
}
