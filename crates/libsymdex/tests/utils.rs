// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use std::fs;

use libsymdex::{SearchResponse, SymbolIndex, load_json_str, load_path};
use tempfile::TempDir;

/// A slice of the Exiv2 function table as a plain JSON payload.
pub const EXIV2_FUNCTIONS: &str = r#"[
    ["gcd_2660", ["gcd", [["../namespaceExiv2.html#a36dc", "Exiv2"]]]],
    ["get_2661", ["Get", [["../classExiv2_1_1INIReader.html#a1042", "Exiv2::INIReader"]]]],
    ["getb_2662", ["getb", [
        ["../classExiv2_1_1BasicIo.html#a648b", "Exiv2::BasicIo::getb()"],
        ["../classExiv2_1_1FileIo.html#a7b21", "Exiv2::FileIo::getb()"],
        ["../classExiv2_1_1MemIo.html#ac3a5", "Exiv2::MemIo::getb()"],
        ["../classExiv2_1_1RemoteIo.html#a0c94", "Exiv2::RemoteIo::getb()"]
    ]]],
    ["getboolean_2663", ["GetBoolean", [["../classExiv2_1_1INIReader.html#ac3d7", "Exiv2::INIReader"]]]],
    ["getdate_2665", ["getDate", [["../classExiv2_1_1DateValue.html#a085b", "Exiv2::DateValue"]]]],
    ["getdouble_2666", ["getDouble", [["../namespaceExiv2.html#a0731", "Exiv2"]]]],
    ["gettype_2683", ["getType", [
        ["../classExiv2_1_1ImageFactory.html#a9338", "Exiv2::ImageFactory::getType(const std::string &path)"],
        ["../classExiv2_1_1ImageFactory.html#a5b0f", "Exiv2::ImageFactory::getType(const byte *data, long size)"],
        ["../classExiv2_1_1ImageFactory.html#abd5d", "Exiv2::ImageFactory::getType(BasicIo &io)"]
    ]]],
    ["gettype double_2684", ["getType< double >", [["../namespaceExiv2.html#ade61", "Exiv2"]]]],
    ["go_2698", ["go", [["../classExiv2_1_1Internal_1_1TiffVisitor.html#a128c", "Exiv2::Internal::TiffVisitor"]]]],
    ["good_2699", ["good", [["../classExiv2_1_1Image.html#a5b9b", "Exiv2::Image"]]]],
    ["group_2701", ["group", [["../classExiv2_1_1Internal_1_1TiffPathItem.html#a20fb", "Exiv2::Internal::TiffPathItem::group()"]]]],
    ["groupname_2704", ["groupName", [["../classExiv2_1_1IptcKey.html#ab72d", "Exiv2::IptcKey::groupName()"]]]]
]"#;

/// The same kind of data as Doxygen writes it: a `functions` table script.
pub const DOXYGEN_FUNCTIONS: &str = "var searchData=\n[\n  ['getb_2662',['getb',['../classExiv2_1_1BasicIo.html#a648b',1,'Exiv2::BasicIo::getb()'],['../classExiv2_1_1FileIo.html#a7b21',1,'Exiv2::FileIo::getb()']]],\n  ['gettype_3c_20double_20_3e_2684',['getType&lt; double &gt;',['../namespaceExiv2.html#ade61',1,'Exiv2']]],\n  ['groupname_2704',['groupName',['../classExiv2_1_1IptcKey.html#ab72d',1,'Exiv2::IptcKey::groupName()']]]\n];\n";

/// A Doxygen `classes` table script.
pub const DOXYGEN_CLASSES: &str = "var searchData=\n[\n  ['gifimage_2697',['GifImage',['../classExiv2_1_1GifImage.html',1,'Exiv2']]],\n  ['groupinfo_2705',['GroupInfo',['../structExiv2_1_1GroupInfo.html',1,'Exiv2']]]\n];\n";

/// Build the Exiv2 fixture index.
pub fn exiv2_index() -> SymbolIndex {
    load_json_str(EXIV2_FUNCTIONS).unwrap()
}

/// Write a Doxygen `search/` directory holding the given `(file name, script)` tables.
pub fn doxygen_dir(tables: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, script) in tables {
        fs::write(temp_dir.path().join(name), script).unwrap();
    }
    temp_dir
}

/// Load a Doxygen directory written by [`doxygen_dir`].
pub fn load_doxygen(tables: &[(&str, &str)]) -> (TempDir, SymbolIndex) {
    let temp_dir = doxygen_dir(tables);
    let index = load_path(temp_dir.path()).unwrap();
    (temp_dir, index)
}

/// Entry labels in display order.
pub fn labels(response: &SearchResponse) -> Vec<String> {
    response.entries().map(|entry| entry.label.clone()).collect()
}
