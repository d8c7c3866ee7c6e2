use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tibphrase::{MemoryDictionary, PhraseParser, Script, Segmenter, Trace};

const DICT: &str = "1\tཆོས\tchos\n\
                    2\tཆོས་སྐུ\tchos sku\n\
                    3\tངོ་བོ་ཉིད\tngo bo nyid\n\
                    4\tརྒྱལ་པོ\trgyal po\n\
                    5\tབཀྲ་ཤིས\tbkra shis\n\
                    6\tབདེ་ལེགས\tbde legs\n";

fn bench_segment(c: &mut Criterion) {
    let dict = MemoryDictionary::from_tsv(DICT);
    let segmenter = Segmenter::new(&dict, Script::Tibetan);

    c.bench_function("segment known words", |b| {
        b.iter(|| {
            let mut trace = Trace::disabled();
            segmenter.segment(black_box("བཀྲ་ཤིས་བདེ་ལེགས་ཆོས་སྐུ་ངོ་བོ་ཉིད"), &[], &mut trace)
        })
    });

    c.bench_function("segment unknown syllables", |b| {
        let input = vec!["ཀཁ"; 12].join("་");
        b.iter(|| {
            let mut trace = Trace::disabled();
            segmenter.segment(black_box(&input), &[], &mut trace)
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let parser = PhraseParser::new(MemoryDictionary::from_tsv(DICT));
    let text = "༄༅། །བཀྲ་ཤིས་བདེ་ལེགས། ཆོས་སྐུ་ངོ་བོ་ཉིད། རྒྱལ་པོའི་ཆོས། ".repeat(8);

    c.bench_function("parse phrase", |b| {
        b.iter(|| parser.parse(black_box(&text), false))
    });
}

criterion_group!(benches, bench_segment, bench_parse);
criterion_main!(benches);
