//! Built-in license set
//!
//! The canned table of licenses the default scanner recognizes: for each
//! license a name, an LRE source describing its text (empty for URL-only
//! entries), and a canonical URL that identifies the license indirectly.
//!
//! The LRE sources are the standard license texts with quest groups around
//! the parts that come and go in the wild (title lines, copyright lines) and
//! wildcards where holder names and years vary. Letter list bullets like
//! `(a)` are left out: text normalization elides them from scanned input, so
//! the patterns never see them. Bullet `(c)` is the exception: it normalizes
//! to the word `copyright`, so an optional `((copyright))??` group stands in
//! its place.

use serde::{Deserialize, Serialize};

/// A single license the scanner can recognize. At least one of `text` and
/// `url` should be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    /// SPDX identifier where one exists.
    pub name: String,
    /// LRE source for the license text; empty for URL-only entries.
    pub text: String,
    /// Canonical URL identifying the license (scheme-less, no trailing
    /// slash); empty when the license has no well-known URL.
    pub url: String,
}

impl License {
    pub fn new(name: &str, text: &str, url: &str) -> License {
        License {
            name: name.to_string(),
            text: text.to_string(),
            url: url.to_string(),
        }
    }
}

/// The built-in license set: pattern-bearing licenses first, then URL-only
/// entries for licenses recognized by reference alone.
pub fn builtin_licenses() -> Vec<License> {
    let mut list = vec![
        License::new("MIT", MIT, ""),
        License::new("Apache-2.0", APACHE_2_0, "www.apache.org/licenses/license-2.0"),
        License::new("BSD-2-Clause", BSD_2_CLAUSE, ""),
        License::new("BSD-3-Clause", BSD_3_CLAUSE, ""),
        License::new("ISC", ISC, ""),
        License::new("Zlib", ZLIB, ""),
        License::new("Unlicense", UNLICENSE, ""),
    ];
    for &(name, url) in BUILTIN_URLS {
        list.push(License::new(name, "", url));
    }
    list
}

// Creative Commons URLs are recognized for every deployed version; ported
// jurisdiction suffixes (…/by/3.0/us) resolve by dropping the last path
// segment at lookup time.
const BUILTIN_URLS: &[(&str, &str)] = &[
    ("CC-BY-2.0", "creativecommons.org/licenses/by/2.0"),
    ("CC-BY-2.5", "creativecommons.org/licenses/by/2.5"),
    ("CC-BY-3.0", "creativecommons.org/licenses/by/3.0"),
    ("CC-BY-4.0", "creativecommons.org/licenses/by/4.0"),
    ("CC-BY-NC-2.0", "creativecommons.org/licenses/by-nc/2.0"),
    ("CC-BY-NC-2.5", "creativecommons.org/licenses/by-nc/2.5"),
    ("CC-BY-NC-3.0", "creativecommons.org/licenses/by-nc/3.0"),
    ("CC-BY-NC-4.0", "creativecommons.org/licenses/by-nc/4.0"),
    ("CC-BY-NC-ND-2.0", "creativecommons.org/licenses/by-nc-nd/2.0"),
    ("CC-BY-NC-ND-2.5", "creativecommons.org/licenses/by-nc-nd/2.5"),
    ("CC-BY-NC-ND-3.0", "creativecommons.org/licenses/by-nc-nd/3.0"),
    ("CC-BY-NC-ND-4.0", "creativecommons.org/licenses/by-nc-nd/4.0"),
    ("CC-BY-NC-SA-2.0", "creativecommons.org/licenses/by-nc-sa/2.0"),
    ("CC-BY-NC-SA-2.5", "creativecommons.org/licenses/by-nc-sa/2.5"),
    ("CC-BY-NC-SA-3.0", "creativecommons.org/licenses/by-nc-sa/3.0"),
    ("CC-BY-NC-SA-4.0", "creativecommons.org/licenses/by-nc-sa/4.0"),
    ("CC-BY-ND-2.0", "creativecommons.org/licenses/by-nd/2.0"),
    ("CC-BY-ND-2.5", "creativecommons.org/licenses/by-nd/2.5"),
    ("CC-BY-ND-3.0", "creativecommons.org/licenses/by-nd/3.0"),
    ("CC-BY-ND-4.0", "creativecommons.org/licenses/by-nd/4.0"),
    ("CC-BY-SA-2.0", "creativecommons.org/licenses/by-sa/2.0"),
    ("CC-BY-SA-2.5", "creativecommons.org/licenses/by-sa/2.5"),
    ("CC-BY-SA-3.0", "creativecommons.org/licenses/by-sa/3.0"),
    ("CC-BY-SA-4.0", "creativecommons.org/licenses/by-sa/4.0"),
    ("CC0-1.0", "creativecommons.org/publicdomain/zero/1.0"),
    ("UPL-1.0", "opensource.org/licenses/upl"),
];

const MIT: &str = r#"
((The))??
((MIT License))??
((Copyright __20__))??
((All rights reserved.))??
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
((AUTHORS OR COPYRIGHT HOLDERS || COPYRIGHT HOLDERS OR CONTRIBUTORS))
BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF
CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
"#;

const BSD_2_CLAUSE: &str = r#"
((BSD 2-Clause License))??
((Copyright __20__))??
((All rights reserved.))??
Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice,
this list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
this list of conditions and the following disclaimer in the documentation
and/or other materials provided with the distribution.

THIS SOFTWARE IS PROVIDED BY __7__ "AS IS" AND ANY EXPRESS OR IMPLIED
WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF
MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO
EVENT SHALL __7__ BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS;
OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR
OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF
ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
"#;

const BSD_3_CLAUSE: &str = r#"
((BSD 3-Clause License))??
((Copyright __20__))??
((All rights reserved.))??
Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice,
this list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
this list of conditions and the following disclaimer in the documentation
and/or other materials provided with the distribution.

((3. Neither the name of the __5__ nor the names of its contributors may be
used to endorse or promote products derived from this software without
specific prior written permission. || 3. The __2__ of __3__ may not be used
to endorse or promote products derived from this software without specific
prior written permission.))

THIS SOFTWARE IS PROVIDED BY __7__ "AS IS" AND ANY EXPRESS OR IMPLIED
WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF
MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO
EVENT SHALL __7__ BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS;
OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR
OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF
ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
"#;

const ISC: &str = r#"
((ISC License))??
((Copyright __20__))??
Permission to use, copy, modify, and/or distribute this software for any
purpose with or without fee is hereby granted, provided that the above
copyright notice and this permission notice appear in all copies.

THE SOFTWARE IS PROVIDED "AS IS" AND __5__ DISCLAIMS ALL WARRANTIES WITH
REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF MERCHANTABILITY
AND FITNESS. IN NO EVENT SHALL __5__ BE LIABLE FOR ANY SPECIAL, DIRECT,
INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES WHATSOEVER RESULTING FROM
LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION OF CONTRACT, NEGLIGENCE
OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN CONNECTION WITH THE USE OR
PERFORMANCE OF THIS SOFTWARE.
"#;

const ZLIB: &str = r#"
((zlib License))??
((Copyright __20__))??
This software is provided 'as-is', without any express or implied warranty.
In no event will the authors be held liable for any damages arising from the
use of this software.

Permission is granted to anyone to use this software for any purpose,
including commercial applications, and to alter it and redistribute it
freely, subject to the following restrictions:

1. The origin of this software must not be misrepresented; you must not
claim that you wrote the original software. If you use this software in a
product, an acknowledgment in the product documentation would be appreciated
but is not required.

2. Altered source versions must be plainly marked as such, and must not be
misrepresented as being the original software.

3. This notice may not be removed or altered from any source distribution.
"#;

const UNLICENSE: &str = r#"
((The Unlicense))??
This is free and unencumbered software released into the public domain.

Anyone is free to copy, modify, publish, use, compile, sell, or distribute
this software, either in source code form or as a compiled binary, for any
purpose, commercial or non-commercial, and by any means.

((In jurisdictions that recognize copyright laws, the author or authors of
this software dedicate any and all copyright interest in the software to the
public domain. We make this dedication for the benefit of the public at
large and to the detriment of our heirs and successors. We intend this
dedication to be an overt act of relinquishment in perpetuity of all present
and future rights to this software under copyright law.))??

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

((For more information, please refer to <http://unlicense.org>))??
"#;

const APACHE_2_0: &str = r#"
((Apache License
Version 2.0, January 2004
http://www.apache.org/licenses/))??

TERMS AND CONDITIONS FOR USE, REPRODUCTION, AND DISTRIBUTION

1. Definitions.

"License" shall mean the terms and conditions for use, reproduction, and
distribution as defined by Sections 1 through 9 of this document.

"Licensor" shall mean the copyright owner or entity authorized by the
copyright owner that is granting the License.

"Legal Entity" shall mean the union of the acting entity and all other
entities that control, are controlled by, or are under common control with
that entity. For the purposes of this definition, "control" means the power,
direct or indirect, to cause the direction or management of such entity,
whether by contract or otherwise, or ownership of fifty percent (50%) or
more of the outstanding shares, or beneficial ownership of such entity.

"You" (or "Your") shall mean an individual or Legal Entity exercising
permissions granted by this License.

"Source" form shall mean the preferred form for making modifications,
including but not limited to software source code, documentation source, and
configuration files.

"Object" form shall mean any form resulting from mechanical transformation
or translation of a Source form, including but not limited to compiled
object code, generated documentation, and conversions to other media types.

"Work" shall mean the work of authorship, whether in Source or Object form,
made available under the License, as indicated by a copyright notice that is
included in or attached to the work (an example is provided in the Appendix
below).

"Derivative Works" shall mean any work, whether in Source or Object form,
that is based on (or derived from) the Work and for which the editorial
revisions, annotations, elaborations, or other modifications represent, as a
whole, an original work of authorship. For the purposes of this License,
Derivative Works shall not include works that remain separable from, or
merely link (or bind by name) to the interfaces of, the Work and Derivative
Works thereof.

"Contribution" shall mean any work of authorship, including the original
version of the Work and any modifications or additions to that Work or
Derivative Works thereof, that is intentionally submitted to Licensor for
inclusion in the Work by the copyright owner or by an individual or Legal
Entity authorized to submit on behalf of the copyright owner. For the
purposes of this definition, "submitted" means any form of electronic,
verbal, or written communication sent to the Licensor or its
representatives, including but not limited to communication on electronic
mailing lists, source code control systems, and issue tracking systems that
are managed by, or on behalf of, the Licensor for the purpose of discussing
and improving the Work, but excluding communication that is conspicuously
marked or otherwise designated in writing by the copyright owner as "Not a
Contribution."

"Contributor" shall mean Licensor and any individual or Legal Entity on
behalf of whom a Contribution has been received by Licensor and subsequently
incorporated within the Work.

2. Grant of Copyright License. Subject to the terms and conditions of this
License, each Contributor hereby grants to You a perpetual, worldwide,
non-exclusive, no-charge, royalty-free, irrevocable copyright license to
reproduce, prepare Derivative Works of, publicly display, publicly perform,
sublicense, and distribute the Work and such Derivative Works in Source or
Object form.

3. Grant of Patent License. Subject to the terms and conditions of this
License, each Contributor hereby grants to You a perpetual, worldwide,
non-exclusive, no-charge, royalty-free, irrevocable (except as stated in
this section) patent license to make, have made, use, offer to sell, sell,
import, and otherwise transfer the Work, where such license applies only to
those patent claims licensable by such Contributor that are necessarily
infringed by their Contribution(s) alone or by combination of their
Contribution(s) with the Work to which such Contribution(s) was submitted.
If You institute patent litigation against any entity (including a
cross-claim or counterclaim in a lawsuit) alleging that the Work or a
Contribution incorporated within the Work constitutes direct or contributory
patent infringement, then any patent licenses granted to You under this
License for that Work shall terminate as of the date such litigation is
filed.

4. Redistribution. You may reproduce and distribute copies of the Work or
Derivative Works thereof in any medium, with or without modifications, and
in Source or Object form, provided that You meet the following conditions:

You must give any other recipients of the Work or Derivative Works a copy of
this License; and

You must cause any modified files to carry prominent notices stating that
You changed the files; and

((copyright))??
You must retain, in the Source form of any Derivative Works that You
distribute, all copyright, patent, trademark, and attribution notices from
the Source form of the Work, excluding those notices that do not pertain to
any part of the Derivative Works; and

If the Work includes a "NOTICE" text file as part of its distribution, then
any Derivative Works that You distribute must include a readable copy of the
attribution notices contained within such NOTICE file, excluding those
notices that do not pertain to any part of the Derivative Works, in at least
one of the following places: within a NOTICE text file distributed as part
of the Derivative Works; within the Source form or documentation, if
provided along with the Derivative Works; or, within a display generated by
the Derivative Works, if and wherever such third-party notices normally
appear. The contents of the NOTICE file are for informational purposes only
and do not modify the License. You may add Your own attribution notices
within Derivative Works that You distribute, alongside or as an addendum to
the NOTICE text from the Work, provided that such additional attribution
notices cannot be construed as modifying the License.

You may add Your own copyright statement to Your modifications and may
provide additional or different license terms and conditions for use,
reproduction, or distribution of Your modifications, or for any such
Derivative Works as a whole, provided Your use, reproduction, and
distribution of the Work otherwise complies with the conditions stated in
this License.

5. Submission of Contributions. Unless You explicitly state otherwise, any
Contribution intentionally submitted for inclusion in the Work by You to the
Licensor shall be under the terms and conditions of this License, without
any additional terms or conditions. Notwithstanding the above, nothing
herein shall supersede or modify the terms of any separate license agreement
you may have executed with Licensor regarding such Contributions.

6. Trademarks. This License does not grant permission to use the trade
names, trademarks, service marks, or product names of the Licensor, except
as required for reasonable and customary use in describing the origin of the
Work and reproducing the content of the NOTICE file.

7. Disclaimer of Warranty. Unless required by applicable law or agreed to in
writing, Licensor provides the Work (and each Contributor provides its
Contributions) on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
KIND, either express or implied, including, without limitation, any
warranties or conditions of TITLE, NON-INFRINGEMENT, MERCHANTABILITY, or
FITNESS FOR A PARTICULAR PURPOSE. You are solely responsible for determining
the appropriateness of using or redistributing the Work and assume any risks
associated with Your exercise of permissions under this License.

8. Limitation of Liability. In no event and under no legal theory, whether
in tort (including negligence), contract, or otherwise, unless required by
applicable law (such as deliberate and grossly negligent acts) or agreed to
in writing, shall any Contributor be liable to You for damages, including
any direct, indirect, special, incidental, or consequential damages of any
character arising as a result of this License or out of the use or inability
to use the Work (including but not limited to damages for loss of goodwill,
work stoppage, computer failure or malfunction, or any and all other
commercial damages or losses), even if such Contributor has been advised of
the possibility of such damages.

9. Accepting Warranty or Additional Liability. While redistributing the Work
or Derivative Works thereof, You may choose to offer, and charge a fee for,
acceptance of support, warranty, indemnity, or other liability obligations
and/or rights consistent with this License. However, in accepting such
obligations, You may act only on Your own behalf and on Your sole
responsibility, not on behalf of any other Contributor, and only if You
agree to indemnify, defend, and hold each Contributor harmless for any
liability incurred by, or claims asserted against, such Contributor by
reason of your accepting any such warranty or additional liability.

END OF TERMS AND CONDITIONS

((APPENDIX: How to apply the Apache License to your work.

To apply the Apache License to your work, attach the following boilerplate
notice, with the fields enclosed by brackets "[]" replaced with your own
identifying information. (Don't include the brackets!) The text should be
enclosed in the appropriate comment syntax for the file format. We also
recommend that a file or class name and description of purpose be included
on the same "printed page" as the copyright notice for easier identification
within third-party archives.

Copyright [yyyy] [name of copyright owner]

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.))??
"#;

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dict;
    use crate::pattern::Pattern;

    #[test]
    fn test_builtin_sources_parse() {
        let mut dict = Dict::new();
        for l in builtin_licenses() {
            if l.text.is_empty() {
                assert!(!l.url.is_empty(), "{}: neither text nor url", l.name);
                continue;
            }
            Pattern::parse(&mut dict, &l.name, &l.text)
                .unwrap_or_else(|e| panic!("{}: {e}", l.name));
        }
    }

    #[test]
    fn test_builtin_names_unique() {
        let list = builtin_licenses();
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate license name");
            }
        }
    }

    #[test]
    fn test_urls_are_canonical() {
        for l in builtin_licenses() {
            if l.url.is_empty() {
                continue;
            }
            assert!(!l.url.starts_with("http"), "{}: url carries a scheme", l.name);
            assert!(!l.url.ends_with('/'), "{}: url has a trailing slash", l.name);
            assert_eq!(l.url, l.url.to_lowercase(), "{}: url not lowercased", l.name);
        }
    }
}
