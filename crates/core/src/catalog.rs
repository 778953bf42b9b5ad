//! The fixed verb list every drill draws from.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{VerbKey, VerbRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("duplicate infinitive in catalog: {0}")]
    DuplicateInfinitive(&'static str),

    #[error("verb '{infinitive}' has an empty form")]
    EmptyForm { infinitive: &'static str },
}

/// Infinitive, simple past, past participle, German meaning.
static VERBS: &[VerbRecord] = &[
    VerbRecord::new("be", "was/were", "been", "sein"),
    VerbRecord::new("beat", "beat", "beaten", "schlagen; besiegen"),
    VerbRecord::new("become", "became", "become", "werden"),
    VerbRecord::new("begin", "began", "begun", "beginnen; anfangen"),
    VerbRecord::new("bet", "bet", "bet", "wetten"),
    VerbRecord::new("bite", "bit", "bitten", "beißen"),
    VerbRecord::new("blow", "blew", "blown", "blasen; pusten"),
    VerbRecord::new("break", "broke", "broken", "(zer)brechen; kaputt machen"),
    VerbRecord::new("bring", "brought", "brought", "(mit)bringen"),
    VerbRecord::new("build", "built", "built", "bauen"),
    VerbRecord::new("burn", "burnt/burned", "burnt/burned", "(ver)brennen"),
    VerbRecord::new("buy", "bought", "bought", "kaufen"),
    VerbRecord::new("catch", "caught", "caught", "fangen"),
    VerbRecord::new("choose", "chose", "chosen", "(aus)wählen"),
    VerbRecord::new("come", "came", "come", "kommen"),
    VerbRecord::new("cost", "cost", "cost", "kosten"),
    VerbRecord::new("cut", "cut", "cut", "schneiden"),
    VerbRecord::new("deal (with)", "dealt (with)", "dealt (with)", "sich befassen (mit); umgehen (mit)"),
    VerbRecord::new("do", "did", "done", "machen; tun"),
    VerbRecord::new("draw", "drew", "drawn", "zeichnen; ziehen"),
    VerbRecord::new("dream", "dreamt/dreamed", "dreamt/dreamed", "träumen"),
    VerbRecord::new("drink", "drank", "drunk", "trinken"),
    VerbRecord::new("drive", "drove", "driven", "fahren"),
    VerbRecord::new("eat", "ate", "eaten", "essen"),
    VerbRecord::new("fall", "fell", "fallen", "(hin)fallen"),
    VerbRecord::new("feed", "fed", "fed", "füttern; ernähren"),
    VerbRecord::new("feel", "felt", "felt", "fühlen"),
    VerbRecord::new("fight", "fought", "fought", "kämpfen; (sich) streiten"),
    VerbRecord::new("find", "found", "found", "finden"),
    VerbRecord::new("fit", "fit/fitted", "fit/fitted", "passen"),
    VerbRecord::new("fly", "flew", "flown", "fliegen"),
    VerbRecord::new("forget", "forgot", "forgotten", "vergessen"),
    VerbRecord::new("forgive", "forgave", "forgiven", "vergeben; verzeihen"),
    VerbRecord::new("freeze", "froze", "frozen", "gefrieren; erstarren"),
    VerbRecord::new("get", "got", "got", "bekommen; erhalten"),
    VerbRecord::new("give", "gave", "given", "geben"),
    VerbRecord::new("go", "went", "gone", "gehen; fahren"),
    VerbRecord::new("grow", "grew", "grown", "wachsen; anbauen; züchten"),
    VerbRecord::new("hang", "hung", "hung", "hängen"),
    VerbRecord::new("have", "had", "had", "haben"),
    VerbRecord::new("hear", "heard", "heard", "hören"),
    VerbRecord::new("hide", "hid", "hidden", "(sich) verstecken"),
    VerbRecord::new("hit", "hit", "hit", "schlagen; treffen"),
    VerbRecord::new("hold", "held", "held", "(fest)halten"),
    VerbRecord::new("hurt", "hurt", "hurt", "verletzen; sich weh tun"),
    VerbRecord::new("keep", "kept", "kept", "(auf)bewahren; behalten"),
    VerbRecord::new("know", "knew", "known", "kennen; wissen"),
    VerbRecord::new("lead", "led", "led", "(an)führen"),
    VerbRecord::new("learn", "learnt/learned", "learnt/learned", "lernen"),
    VerbRecord::new("leave", "left", "left", "(ver)lassen"),
    VerbRecord::new("lend", "lent", "lent", "(ver)leihen"),
    VerbRecord::new("let", "let", "let", "lassen"),
    VerbRecord::new("lie", "lay", "lain", "liegen"),
    VerbRecord::new("lose", "lost", "lost", "verlieren"),
    VerbRecord::new("make", "made", "made", "machen; tun"),
    VerbRecord::new("mean", "meant", "meant", "bedeuten; meinen"),
    VerbRecord::new("meet", "met", "met", "treffen"),
    VerbRecord::new("pay", "paid", "paid", "(be)zahlen"),
    VerbRecord::new("put", "put", "put", "legen; setzen; stellen"),
    VerbRecord::new("read", "read", "read", "lesen"),
    VerbRecord::new("ride", "rode", "ridden", "fahren; reiten"),
    VerbRecord::new("ring", "rang", "rung", "klingeln; läuten"),
    VerbRecord::new("rise", "rose", "risen", "steigen; sich erheben"),
    VerbRecord::new("run", "ran", "run", "laufen; rennen"),
    VerbRecord::new("say", "said", "said", "sagen"),
    VerbRecord::new("see", "saw", "seen", "sehen"),
    VerbRecord::new("sell", "sold", "sold", "verkaufen"),
    VerbRecord::new("send", "sent", "sent", "senden; verschicken"),
    VerbRecord::new("set up", "set up", "set up", "erbauen; errichten"),
    VerbRecord::new("shine", "shone", "shone", "scheinen; glänzen"),
    VerbRecord::new("shoot", "shot", "shot", "schießen"),
    VerbRecord::new("show", "showed", "shown", "zeigen"),
    VerbRecord::new("sing", "sang", "sung", "singen"),
    VerbRecord::new("sink", "sank", "sunk", "untergehen; sinken"),
    VerbRecord::new("sit", "sat", "sat", "sitzen"),
    VerbRecord::new("sleep", "slept", "slept", "schlafen"),
    VerbRecord::new("smell", "smelt/smelled", "smelt/smelled", "riechen; duften"),
    VerbRecord::new("speak", "spoke", "spoken", "sprechen"),
    VerbRecord::new("spell", "spelt/spelled", "spelt/spelled", "buchstabieren"),
    VerbRecord::new("spend", "spent", "spent", "ausgeben; verbringen"),
    VerbRecord::new("spill", "spilt/spilled", "spilt/spilled", "verschütten; auslaufen"),
    VerbRecord::new("stand", "stood", "stood", "stehen"),
    VerbRecord::new("steal", "stole", "stolen", "stehlen"),
    VerbRecord::new("sting", "stung", "stung", "stechen"),
    VerbRecord::new("swim", "swam", "swum", "schwimmen"),
    VerbRecord::new("take", "took", "taken", "nehmen"),
    VerbRecord::new("teach", "taught", "taught", "unterrichten; lehren; beibringen"),
    VerbRecord::new("tell", "told", "told", "erzählen"),
    VerbRecord::new("think", "thought", "thought", "(nach)denken; glauben"),
    VerbRecord::new("throw", "threw", "thrown", "werfen"),
    VerbRecord::new("understand", "understood", "understood", "verstehen"),
    VerbRecord::new("wake up", "woke up", "woken up", "(auf)wachen; (auf)wecken"),
    VerbRecord::new("wear", "wore", "worn", "anhaben; tragen"),
    VerbRecord::new("win", "won", "won", "gewinnen; siegen"),
    VerbRecord::new("write", "wrote", "written", "schreiben"),
];

/// The built-in catalog.
#[must_use]
pub fn verbs() -> &'static [VerbRecord] {
    VERBS
}

/// Look up a verb by its (exact) infinitive.
#[must_use]
pub fn find_by_infinitive<'a>(catalog: &'a [VerbRecord], infinitive: &str) -> Option<&'a VerbRecord> {
    catalog.iter().find(|v| v.infinitive == infinitive)
}

/// Look up a verb by its progress-file key.
#[must_use]
pub fn find_by_key<'a>(catalog: &'a [VerbRecord], key: &VerbKey) -> Option<&'a VerbRecord> {
    let (german, infinitive) = key.parts()?;
    catalog
        .iter()
        .find(|v| v.infinitive == infinitive && v.german == german)
}

/// Check that a catalog can serve as the drill source.
///
/// Both stores rely on infinitives being unique: the wrong-count file is keyed
/// by infinitive alone.
///
/// # Errors
///
/// Returns `CatalogError` for an empty catalog, a blank form, or a repeated infinitive.
pub fn validate(catalog: &[VerbRecord]) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    let mut seen = HashSet::new();
    for verb in catalog {
        let blank = [verb.infinitive, verb.past_simple, verb.past_participle, verb.german]
            .iter()
            .any(|s| s.trim().is_empty());
        if blank {
            return Err(CatalogError::EmptyForm {
                infinitive: verb.infinitive,
            });
        }
        if !seen.insert(verb.infinitive) {
            return Err(CatalogError::DuplicateInfinitive(verb.infinitive));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        assert_eq!(validate(verbs()), Ok(()));
        assert_eq!(verbs().len(), 95);
    }

    #[test]
    fn lookups_find_go() {
        let go = find_by_infinitive(verbs(), "go").unwrap();
        assert_eq!(go.past_simple, "went");
        assert_eq!(find_by_key(verbs(), &go.key()), Some(go));
        assert!(find_by_key(verbs(), &VerbKey::new("gehen", "go")).is_none());
    }

    #[test]
    fn duplicates_are_rejected() {
        let dup = [
            VerbRecord::new("go", "went", "gone", "gehen"),
            VerbRecord::new("go", "went", "gone", "fahren"),
        ];
        assert_eq!(validate(&dup), Err(CatalogError::DuplicateInfinitive("go")));
        assert_eq!(validate(&[]), Err(CatalogError::Empty));
    }
}
