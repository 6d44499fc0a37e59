//! French translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // Recommandations
    t.insert("insight.generic_category".into(), "appareil".into());
    t.insert("insight.dominant.text".into(), "R\u{00E9}duisez l'utilisation de {category} d'une heure par jour".into());
    t.insert("insight.dominant.description".into(), "{category} consomme le plus d'\u{00E9}nergie. Pensez \u{00E0} en r\u{00E9}duire l'usage.".into());
    t.insert("insight.offpeak.text".into(), "D\u{00E9}calez les activit\u{00E9}s \u{00E9}nergivores en heures creuses (22h - 6h)".into());
    t.insert("insight.offpeak.description".into(), "Faire fonctionner les appareils gourmands en heures creuses peut r\u{00E9}duire sensiblement votre facture.".into());
    t.insert("insight.refrigeration.text".into(), "R\u{00E9}glez la temp\u{00E9}rature de vos appareils de froid".into());
    t.insert("insight.refrigeration.description".into(), "R\u{00E9}glez le r\u{00E9}frig\u{00E9}rateur entre 3 et 4\u{00B0}C et le cong\u{00E9}lateur \u{00E0} -18\u{00B0}C pour une efficacit\u{00E9} optimale.".into());
    t.insert("insight.led.text".into(), "Envisagez un \u{00E9}clairage LED dans tout le logement".into());
    t.insert("insight.led.description".into(), "Les ampoules LED consomment jusqu'\u{00E0} 80 % d'\u{00E9}nergie en moins que les ampoules \u{00E0} incandescence et durent bien plus longtemps.".into());
    t.insert("insight.reduce_below.text".into(), "Essayez de descendre sous 60 kWh par mois".into());
    t.insert("insight.reduce_below.description".into(), "Votre consommation vous place dans une tranche tarifaire sup\u{00E9}rieure. Passer sous 60 kWh par mois peut nettement baisser votre facture.".into());

    // Rapport
    t.insert("report.title".into(), "Rapport de consommation".into());
    t.insert("report.no_data".into(), "Aucune donn\u{00E9}e pour le moment. Importez un fichier CSV pour commencer.".into());
    t.insert("report.average_daily".into(), "Consommation moyenne par jour".into());
    t.insert("report.projected_monthly".into(), "Consommation mensuelle estim\u{00E9}e".into());
    t.insert("report.predicted_bill".into(), "Facture estim\u{00E9}e".into());
    t.insert("report.dominant_category".into(), "Plus gros consommateur".into());
    t.insert("report.none".into(), "aucun".into());
    t.insert("report.savings".into(), "\u{00C9}conomies possibles".into());
    t.insert("report.recommendations".into(), "Recommandations".into());
    t.insert("report.save_up_to".into(), "jusqu'\u{00E0}".into());

    // Facture
    t.insert("bill.title".into(), "D\u{00E9}tail de la facture".into());
    t.insert("bill.units".into(), "Unit\u{00E9}s consomm\u{00E9}es".into());
    t.insert("bill.fixed_charge".into(), "Part fixe".into());
    t.insert("bill.variable_charge".into(), "Part \u{00E9}nergie".into());
    t.insert("bill.total".into(), "Total".into());

    // Import
    t.insert("import.summary".into(), "{rows} lignes import\u{00E9}es sur {days} jours ({skipped} ignor\u{00E9}es)".into());
    t.insert("storage.cleared".into(), "Donn\u{00E9}es de consommation supprim\u{00E9}es".into());

    t
}
