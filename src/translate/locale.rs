use ahash::AHashMap;
use indexmap::IndexMap;
use std::sync::LazyLock;

/// Lower-cased language names, endonyms and variant spellings -> locale code.
const KNOWN_LABELS: &[(&str, &str)] = &[
    // English
    ("english", "en"),
    ("en", "en"),
    ("en-us", "en-US"),
    ("us english", "en-US"),
    ("american english", "en-US"),
    ("en-gb", "en-GB"),
    ("british english", "en-GB"),
    ("uk english", "en-GB"),
    ("en-ca", "en-CA"),
    ("canadian english", "en-CA"),
    ("en-au", "en-AU"),
    ("australian english", "en-AU"),
    ("en-in", "en-IN"),
    ("indian english", "en-IN"),
    // Spanish
    ("spanish", "es"),
    ("español", "es"),
    ("espanol", "es"),
    ("castellano", "es"),
    ("es-es", "es-ES"),
    ("spain spanish", "es-ES"),
    ("es-mx", "es-MX"),
    ("mexican spanish", "es-MX"),
    ("es-419", "es-419"),
    ("latin american spanish", "es-419"),
    ("es-ar", "es-AR"),
    // French
    ("french", "fr"),
    ("français", "fr"),
    ("francais", "fr"),
    ("fr-ca", "fr-CA"),
    ("canadian french", "fr-CA"),
    ("fr-be", "fr-BE"),
    ("belgian french", "fr-BE"),
    ("fr-ch", "fr-CH"),
    ("swiss french", "fr-CH"),
    // Portuguese
    ("portuguese", "pt"),
    ("português", "pt"),
    ("portugues", "pt"),
    ("pt-br", "pt-BR"),
    ("brazilian portuguese", "pt-BR"),
    ("pt-pt", "pt-PT"),
    ("european portuguese", "pt-PT"),
    // German
    ("german", "de"),
    ("deutsch", "de"),
    ("de-at", "de-AT"),
    ("austrian german", "de-AT"),
    ("de-ch", "de-CH"),
    ("swiss german", "de-CH"),
    // Italian, Dutch, Flemish
    ("italian", "it"),
    ("italiano", "it"),
    ("dutch", "nl"),
    ("nederlands", "nl"),
    ("vlaams", "nl-BE"),
    ("flemish", "nl-BE"),
    ("nl-be", "nl-BE"),
    // Nordic
    ("swedish", "sv"),
    ("svenska", "sv"),
    ("norwegian", "no"),
    ("norsk", "no"),
    ("bokmål", "nb"),
    ("bokmal", "nb"),
    ("nynorsk", "nn"),
    ("danish", "da"),
    ("dansk", "da"),
    ("finnish", "fi"),
    ("suomi", "fi"),
    ("icelandic", "is"),
    ("íslenska", "is"),
    ("islenska", "is"),
    // Baltic
    ("estonian", "et"),
    ("eesti", "et"),
    ("latvian", "lv"),
    ("latviešu", "lv"),
    ("lithuanian", "lt"),
    ("lietuvių", "lt"),
    // Central and Eastern Europe
    ("polish", "pl"),
    ("polski", "pl"),
    ("czech", "cs"),
    ("čeština", "cs"),
    ("cestina", "cs"),
    ("slovak", "sk"),
    ("slovenčina", "sk"),
    ("slovencina", "sk"),
    ("slovenian", "sl"),
    ("slovenščina", "sl"),
    ("slovenscina", "sl"),
    ("hungarian", "hu"),
    ("magyar", "hu"),
    ("romanian", "ro"),
    ("română", "ro"),
    ("romana", "ro"),
    ("moldovan", "ro-MD"),
    ("bulgarian", "bg"),
    ("български", "bg"),
    ("greek", "el"),
    ("ελληνικά", "el"),
    // Balkans
    ("serbian", "sr"),
    ("srpski", "sr"),
    ("српски", "sr"),
    ("croatian", "hr"),
    ("hrvatski", "hr"),
    ("bosnian", "bs"),
    ("bosanski", "bs"),
    ("macedonian", "mk"),
    ("македонски", "mk"),
    ("albanian", "sq"),
    ("shqip", "sq"),
    // East Slavic
    ("ukrainian", "uk"),
    ("українська", "uk"),
    ("belarusian", "be"),
    ("беларуская", "be"),
    ("russian", "ru"),
    ("русский", "ru"),
    // Caucasus and Central Asia
    ("armenian", "hy"),
    ("հայերեն", "hy"),
    ("georgian", "ka"),
    ("ქართული", "ka"),
    ("azerbaijani", "az"),
    ("azerbaijan", "az"),
    ("azeri", "az"),
    ("azərbaycan", "az"),
    ("kazakh", "kk"),
    ("қазақ", "kk"),
    ("uzbek", "uz"),
    ("oʻzbekcha", "uz"),
    ("ozbekcha", "uz"),
    ("tajik", "tg"),
    ("tojiki", "tg"),
    ("kyrgyz", "ky"),
    ("кыргызча", "ky"),
    ("turkmen", "tk"),
    ("türkmençe", "tk"),
    ("turkmence", "tk"),
    ("mongolian", "mn"),
    ("монгол", "mn"),
    // Middle East
    ("turkish", "tr"),
    ("türkçe", "tr"),
    ("turkce", "tr"),
    ("arabic", "ar"),
    ("العربية", "ar"),
    ("persian", "fa"),
    ("farsi", "fa"),
    ("فارسی", "fa"),
    ("dari", "fa-AF"),
    ("pashto", "ps"),
    ("پښتو", "ps"),
    ("kurdish", "ku"),
    ("kurdî", "ku"),
    ("hebrew", "he"),
    ("עברית", "he"),
    ("ivrit", "he"),
    ("yiddish", "yi"),
    ("יידיש", "yi"),
    // South Asia
    ("hindi", "hi"),
    ("हिंदी", "hi"),
    ("urdu", "ur"),
    ("اردو", "ur"),
    ("bengali", "bn"),
    ("bangla", "bn"),
    ("বাংলা", "bn"),
    ("punjabi", "pa"),
    ("panjabi", "pa"),
    ("ਪੰਜਾਬੀ", "pa"),
    ("gujarati", "gu"),
    ("ગુજરાતી", "gu"),
    ("marathi", "mr"),
    ("मराठी", "mr"),
    ("tamil", "ta"),
    ("தமிழ்", "ta"),
    ("telugu", "te"),
    ("తెలుగు", "te"),
    ("kannada", "kn"),
    ("ಕನ್ನಡ", "kn"),
    ("malayalam", "ml"),
    ("മലയാളം", "ml"),
    ("sinhala", "si"),
    ("sinhalese", "si"),
    ("සිංහල", "si"),
    ("odia", "or"),
    ("oriya", "or"),
    ("ଓଡ଼ିଆ", "or"),
    ("assamese", "as"),
    ("অসমীয়া", "as"),
    ("nepali", "ne"),
    ("नेपाली", "ne"),
    // Southeast Asia
    ("burmese", "my"),
    ("myanmar", "my"),
    ("မြန်မာ", "my"),
    ("khmer", "km"),
    ("cambodian", "km"),
    ("ខ្មែរ", "km"),
    ("lao", "lo"),
    ("ລາວ", "lo"),
    ("thai", "th"),
    ("ไทย", "th"),
    ("vietnamese", "vi"),
    ("tiếng việt", "vi"),
    ("tieng viet", "vi"),
    ("indonesian", "id"),
    ("bahasa indonesia", "id"),
    ("bahasa", "id"),
    ("malay", "ms"),
    ("bahasa melayu", "ms"),
    ("melayu", "ms"),
    ("filipino", "fil"),
    ("tagalog", "fil"),
    ("tl", "tl"),
    // East Asia
    ("japanese", "ja"),
    ("nihongo", "ja"),
    ("日本語", "ja"),
    ("にほんご", "ja"),
    ("korean", "ko"),
    ("한국어", "ko"),
    ("조선말", "ko"),
    ("chinese", "zh"),
    ("中文", "zh"),
    ("simplified chinese", "zh-CN"),
    ("traditional chinese", "zh-TW"),
    ("简体中文", "zh-CN"),
    ("繁體中文", "zh-TW"),
    ("zh-cn", "zh-CN"),
    ("zh-tw", "zh-TW"),
    ("zh-hk", "zh-HK"),
    ("cantonese", "zh-HK"),
    ("粤语", "zh-HK"),
    ("粵語", "zh-HK"),
    // Africa
    ("afrikaans", "af"),
    ("hausa", "ha"),
    ("igbo", "ig"),
    ("yoruba", "yo"),
    ("swahili", "sw"),
    ("kiswahili", "sw"),
    ("amharic", "am"),
    ("አማርኛ", "am"),
    ("somali", "so"),
    ("af-soomaali", "so"),
    ("zulu", "zu"),
    ("xhosa", "xh"),
    ("sesotho", "st"),
    ("setswana", "tn"),
    ("tswana", "tn"),
    ("shona", "sn"),
    ("malagasy", "mg"),
    // Americas and Pacific
    ("haitian creole", "ht"),
    ("kreyòl ayisyen", "ht"),
    ("maori", "mi"),
    ("te reo māori", "mi"),
    ("te reo maori", "mi"),
    ("samoan", "sm"),
    ("gagana sāmoa", "sm"),
    ("tongan", "to"),
    ("lea fakatonga", "to"),
    ("fijian", "fj"),
];

static LABEL_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| KNOWN_LABELS.iter().copied().collect());

/// Resolves a selection label such as `Español` to a locale code.
///
/// The explicit map wins, then the built-in table, then the first two
/// characters of the lower-cased label. Returns `None` when nothing usable
/// remains.
pub fn resolve_locale(label: &str, language_map: &IndexMap<String, String>) -> Option<String> {
    if let Some(code) = language_map.get(label) {
        return Some(code.clone()).filter(|c| !c.is_empty());
    }

    let normalized = label.trim().to_lowercase();
    if let Some(code) = LABEL_TABLE.get(normalized.as_str()) {
        return Some((*code).to_string());
    }

    let prefix: String = normalized.chars().take(2).collect();
    (prefix.chars().count() == 2).then_some(prefix)
}
