//! Static IPC reference data: the section catalogue and the ordered keyword
//! rules the predictor scores descriptions against.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// A catalogued IPC section.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SectionRecord {
    pub id: &'static str,
    pub description: &'static str,
    pub punishment: &'static str,
    pub relevance: &'static str,
}

/// A keyword and the sections it points at. Rules are evaluated in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub sections: &'static [&'static str],
    pub weight: u32,
    pub context: &'static str,
}

const fn rule(
    keyword: &'static str,
    sections: &'static [&'static str],
    weight: u32,
    context: &'static str,
) -> KeywordRule {
    KeywordRule {
        keyword,
        sections,
        weight,
        context,
    }
}

pub static SECTIONS: &[SectionRecord] = &[
    SectionRecord {
        id: "IPC 378",
        description: "Theft",
        punishment: "Imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        relevance: "Involves dishonestly taking movable property out of the possession of any person without their consent.",
    },
    SectionRecord {
        id: "IPC 379",
        description: "Punishment for theft",
        punishment: "Imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        relevance: "Standard punishment for theft offenses.",
    },
    SectionRecord {
        id: "IPC 380",
        description: "Theft in dwelling house",
        punishment: "Imprisonment of either description for a term which may extend to seven years, and shall also be liable to fine.",
        relevance: "Theft committed in a dwelling house or building used for custody of property.",
    },
    SectionRecord {
        id: "IPC 390",
        description: "Robbery",
        punishment: "Imprisonment for life, or with rigorous imprisonment for a term which may extend to ten years, and shall also be liable to fine.",
        relevance: "Theft or extortion committed with violence or threat of violence.",
    },
    SectionRecord {
        id: "IPC 392",
        description: "Punishment for robbery",
        punishment: "Imprisonment for life, or with rigorous imprisonment for a term which may extend to ten years, and shall also be liable to fine.",
        relevance: "Standard punishment for robbery offenses.",
    },
    SectionRecord {
        id: "IPC 302",
        description: "Murder",
        punishment: "Death, or imprisonment for life, and shall also be liable to fine.",
        relevance: "Causing death with intention to cause death or bodily injury likely to cause death.",
    },
    SectionRecord {
        id: "IPC 304",
        description: "Culpable homicide not amounting to murder",
        punishment: "Imprisonment for life, or imprisonment of either description for a term which may extend to ten years, and shall also be liable to fine.",
        relevance: "Causing death without intention but with knowledge that the act is likely to cause death.",
    },
    SectionRecord {
        id: "IPC 351",
        description: "Assault",
        punishment: "Imprisonment of either description for a term which may extend to three months, or with fine which may extend to five hundred rupees, or with both.",
        relevance: "Making any gesture or preparation intending or knowing it to be likely that such gesture or preparation will cause any person present to apprehend that he will be subjected to criminal force.",
    },
    SectionRecord {
        id: "IPC 354",
        description: "Assault or criminal force to woman with intent to outrage her modesty",
        punishment: "Imprisonment of either description for a term which may extend to two years, or with fine, or with both.",
        relevance: "Assault or use of criminal force against a woman with intent to outrage her modesty.",
    },
    SectionRecord {
        id: "IPC 420",
        description: "Cheating and dishonestly inducing delivery of property",
        punishment: "Imprisonment of either description for a term which may extend to seven years, and shall also be liable to fine.",
        relevance: "Cheating and dishonestly inducing any person to deliver any property or valuable security.",
    },
    SectionRecord {
        id: "IPC 415",
        description: "Cheating",
        punishment: "Varies based on the specific circumstances of the cheating.",
        relevance: "Whoever, by deceiving any person, fraudulently or dishonestly induces that person to deliver any property or valuable security.",
    },
    SectionRecord {
        id: "IPC 406",
        description: "Punishment for criminal breach of trust",
        punishment: "Imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        relevance: "Criminal breach of trust by a person entrusted with property or dominion over property.",
    },
    SectionRecord {
        id: "IPC 425",
        description: "Mischief",
        punishment: "Imprisonment of either description for a term which may extend to three months, or with fine, or with both.",
        relevance: "Causing destruction of any property or any change in it which destroys or diminishes its value or utility.",
    },
    SectionRecord {
        id: "IPC 120B",
        description: "Punishment of criminal conspiracy",
        punishment: "Same as that provided for the abetment of the offence which is the object of the conspiracy.",
        relevance: "When two or more persons agree to do or cause to be done an illegal act or an act which is not illegal by illegal means.",
    },
    SectionRecord {
        id: "IPC 34",
        description: "Acts done by several persons in furtherance of common intention",
        punishment: "Each person is liable for the act in the same manner as if it were done by him alone.",
        relevance: "When a criminal act is done by several persons in furtherance of the common intention of all.",
    },
    SectionRecord {
        id: "IPC 463",
        description: "Forgery",
        punishment: "Imprisonment of either description for a term which may extend to two years, or with fine, or with both.",
        relevance: "Making a false document or electronic record with intent to cause damage or injury.",
    },
    SectionRecord {
        id: "IPC 441",
        description: "Criminal trespass",
        punishment: "Imprisonment of either description for a term which may extend to three months, or with fine which may extend to five hundred rupees, or with both.",
        relevance: "Entering into or upon property in the possession of another with intent to commit an offence or to intimidate, insult or annoy any person in possession of such property.",
    },
    SectionRecord {
        id: "IPC 319",
        description: "Hurt",
        punishment: "Imprisonment of either description for a term which may extend to one year, or with fine which may extend to one thousand rupees, or with both.",
        relevance: "Causing bodily pain, disease or infirmity to any person.",
    },
    SectionRecord {
        id: "IPC 323",
        description: "Voluntarily causing hurt",
        punishment: "Imprisonment of either description for a term which may extend to one year, or with fine which may extend to one thousand rupees, or with both.",
        relevance: "Voluntarily causing hurt to any person.",
    },
    SectionRecord {
        id: "IPC 359",
        description: "Kidnapping",
        punishment: "Imprisonment of either description for a term which may extend to seven years, and shall also be liable to fine.",
        relevance: "Taking or enticing away any minor or person of unsound mind out of the keeping of the lawful guardian.",
    },
    SectionRecord {
        id: "IPC 375",
        description: "Rape",
        punishment: "Imprisonment for life, or with imprisonment of either description for a term which may extend to ten years, and shall also be liable to fine.",
        relevance: "Sexual intercourse with a woman against her will or without her consent.",
    },
    SectionRecord {
        id: "IPC 499",
        description: "Defamation",
        punishment: "Simple imprisonment for a term which may extend to two years, or with fine, or with both.",
        relevance: "Making or publishing any imputation concerning any person intending to harm, or knowing or having reason to believe that such imputation will harm, the reputation of such person.",
    },
    SectionRecord {
        id: "IPC 383",
        description: "Extortion",
        punishment: "Imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        relevance: "Intentionally putting any person in fear of any injury to that person or any other person, and thereby dishonestly inducing that person to deliver any property or valuable security.",
    },
    SectionRecord {
        id: "IPC 124A",
        description: "Sedition",
        punishment: "Imprisonment for life, or with imprisonment which may extend to three years, and shall also be liable to fine.",
        relevance: "Whoever, by words, either spoken or written, or by signs, or by visible representation, or otherwise, brings or attempts to bring into hatred or contempt, or excites or attempts to excite disaffection towards the Government established by law.",
    },
    SectionRecord {
        id: "IPC 304B",
        description: "Dowry death",
        punishment: "Imprisonment for life, or with imprisonment for a term which may extend to ten years, and shall also be liable to fine.",
        relevance: "Where the death of a woman is caused by any burns or bodily injury or occurs otherwise than under normal circumstances within seven years of her marriage.",
    },
    SectionRecord {
        id: "IPC 498A",
        description: "Cruelty by husband or relatives of husband",
        punishment: "Imprisonment for a term which may extend to three years, and shall also be liable to fine.",
        relevance: "Subjecting a woman to cruelty by her husband or any relative of her husband.",
    },
    SectionRecord {
        id: "IPC 304A",
        description: "Causing death by negligence",
        punishment: "Imprisonment of either description for a term which may extend to two years, or with fine, or with both.",
        relevance: "Causing the death of any person by doing any rash or negligent act not amounting to culpable homicide.",
    },
    SectionRecord {
        id: "IPC 279",
        description: "Rash driving or riding on a public way",
        punishment: "Imprisonment of either description for a term which may extend to six months, or with fine which may extend to one thousand rupees, or with both.",
        relevance: "Driving or riding any vehicle on a public way in a manner so rash or negligent as to endanger human life or likely to cause hurt or injury to any other person.",
    },
];

pub static KEYWORD_RULES: &[KeywordRule] = &[
    rule("theft", &["IPC 378", "IPC 379", "IPC 380"], 3, "property crime"),
    rule("steal", &["IPC 378", "IPC 379", "IPC 380"], 3, "property crime"),
    rule("stolen", &["IPC 378", "IPC 379", "IPC 380"], 3, "property crime"),
    rule("robbery", &["IPC 390", "IPC 392", "IPC 394"], 4, "violent property crime"),
    rule("rob", &["IPC 390", "IPC 392", "IPC 394"], 4, "violent property crime"),
    rule("murder", &["IPC 302", "IPC 304", "IPC 300"], 5, "homicide"),
    rule("kill", &["IPC 302", "IPC 304", "IPC 300"], 5, "homicide"),
    rule("death", &["IPC 302", "IPC 304", "IPC 300"], 4, "homicide"),
    rule("assault", &["IPC 351", "IPC 352", "IPC 354"], 3, "physical violence"),
    rule("attack", &["IPC 351", "IPC 352", "IPC 354"], 3, "physical violence"),
    rule("hit", &["IPC 319", "IPC 323", "IPC 324"], 2, "physical violence"),
    rule("hurt", &["IPC 319", "IPC 323", "IPC 324"], 2, "physical violence"),
    rule("injury", &["IPC 319", "IPC 323", "IPC 324"], 2, "physical violence"),
    rule("fraud", &["IPC 420", "IPC 415", "IPC 406"], 3, "deception"),
    rule("cheat", &["IPC 420", "IPC 415", "IPC 417"], 3, "deception"),
    rule("cheating", &["IPC 420", "IPC 415", "IPC 417"], 3, "deception"),
    rule("deceive", &["IPC 420", "IPC 415", "IPC 417"], 3, "deception"),
    rule("fake", &["IPC 463", "IPC 464", "IPC 465"], 2, "forgery"),
    rule("forgery", &["IPC 463", "IPC 464", "IPC 465"], 3, "forgery"),
    rule("damage", &["IPC 425", "IPC 426", "IPC 427"], 2, "property damage"),
    rule("destroy", &["IPC 425", "IPC 426", "IPC 427"], 2, "property damage"),
    rule("vandalism", &["IPC 425", "IPC 426", "IPC 427"], 2, "property damage"),
    rule("rape", &["IPC 375", "IPC 376", "IPC 376A"], 5, "sexual violence"),
    rule("molest", &["IPC 354", "IPC 509"], 4, "sexual harassment"),
    rule("harassment", &["IPC 354", "IPC 509"], 3, "sexual harassment"),
    rule("kidnap", &["IPC 359", "IPC 360", "IPC 363"], 4, "abduction"),
    rule("abduction", &["IPC 362", "IPC 363", "IPC 366"], 4, "abduction"),
    rule("threat", &["IPC 503", "IPC 506", "IPC 507"], 2, "intimidation"),
    rule("threaten", &["IPC 503", "IPC 506", "IPC 507"], 2, "intimidation"),
    rule("intimidate", &["IPC 503", "IPC 506", "IPC 507"], 2, "intimidation"),
    rule("conspiracy", &["IPC 120A", "IPC 120B"], 3, "group crime"),
    rule("plan", &["IPC 120A", "IPC 120B"], 2, "group crime"),
    rule("together", &["IPC 34", "IPC 149"], 2, "group crime"),
    rule("group", &["IPC 34", "IPC 149"], 2, "group crime"),
    rule("accident", &["IPC 304A", "IPC 279"], 2, "negligence"),
    rule("rash", &["IPC 304A", "IPC 279"], 2, "negligence"),
    rule("negligent", &["IPC 304A", "IPC 279"], 2, "negligence"),
    rule("driving", &["IPC 279", "IPC 304A"], 2, "traffic"),
    rule("dowry", &["IPC 304B", "IPC 498A"], 4, "domestic violence"),
    rule("cruelty", &["IPC 498A", "IPC 323", "IPC 324"], 3, "domestic violence"),
    rule("domestic", &["IPC 498A", "IPC 323", "IPC 324"], 3, "domestic violence"),
    rule("defame", &["IPC 499", "IPC 500", "IPC 501"], 2, "reputation"),
    rule("insult", &["IPC 504", "IPC 509"], 2, "reputation"),
    rule("abuse", &["IPC 504", "IPC 509"], 2, "reputation"),
    rule("extort", &["IPC 383", "IPC 384", "IPC 385"], 3, "coercion"),
    rule("blackmail", &["IPC 383", "IPC 384", "IPC 385"], 3, "coercion"),
    rule("trespass", &["IPC 441", "IPC 447", "IPC 448"], 2, "property invasion"),
    rule("enter", &["IPC 441", "IPC 447", "IPC 448"], 1, "property invasion"),
    rule("unauthorized", &["IPC 441", "IPC 447", "IPC 448"], 2, "property invasion"),
];

static SECTION_INDEX: Lazy<HashMap<&'static str, &'static SectionRecord>> =
    Lazy::new(|| SECTIONS.iter().map(|s| (s.id, s)).collect());

/// Looks up a section by its id, e.g. `"IPC 378"`.
pub fn section(id: &str) -> Option<&'static SectionRecord> {
    SECTION_INDEX.get(id).copied()
}
